use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // INFO by default; override with RUST_LOG for debugging.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "storefront=info,tower_http=info,sqlx=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().await?;

    sqlx::migrate!().run(&config.database_pool).await?;

    let app = storefront::create_app(config.clone());

    let addr: SocketAddr = config.server_address().parse()?;
    tracing::info!("Starting storefront server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
