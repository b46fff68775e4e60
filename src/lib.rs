pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use config::AppConfig;
use handlers::{
    contact::{
        get_all_inquiries, get_inquiry_details, get_unread_inquiries, mark_inquiry_read,
        submit_contact, track_inquiry, update_inquiry_status,
    },
    products::{
        create_product, delete_product, get_all_products, get_product, update_product,
        upload_products_csv,
    },
};

pub fn create_app(config: AppConfig) -> Router {
    let cors_origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(cors_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .nest(
            "/contact",
            Router::new()
                .route("/", post(submit_contact))
                .route("/track/:reference_code", get(track_inquiry))
                .route("/admin/all", get(get_all_inquiries))
                .route("/admin/unread", get(get_unread_inquiries))
                .route("/admin/:reference_code", get(get_inquiry_details))
                .route("/admin/:reference_code/status", put(update_inquiry_status))
                .route("/admin/:reference_code/read", put(mark_inquiry_read)),
        )
        .nest(
            "/products",
            Router::new()
                .route("/", get(get_all_products).post(create_product))
                .route("/upload", post(upload_products_csv))
                .route(
                    "/:id",
                    get(get_product).put(update_product).delete(delete_product),
                ),
        )
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn(middleware::request_id_middleware))
                .layer(cors),
        )
        .with_state(config)
}
