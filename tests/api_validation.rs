//! Boundary behavior that does not require a live database: request
//! validation, multipart shape checks, and routing.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use storefront::config::{AppConfig, DatabaseConfig, MailConfig};
use storefront::services::mailer::{Notifier, OutboundEmail};

struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn send(&self, _email: &OutboundEmail) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Config with a lazy pool: the router builds without a reachable database,
/// and none of these tests hit it.
fn test_config() -> AppConfig {
    let database = DatabaseConfig {
        host: "localhost".to_string(),
        port: 5432,
        username: "postgres".to_string(),
        password: "postgres".to_string(),
        database: "storefront_test".to_string(),
        ssl_mode: "prefer".to_string(),
    };

    let database_pool = PgPoolOptions::new()
        .connect_lazy(&database.connection_string())
        .expect("lazy pool");

    AppConfig {
        database,
        mail: MailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 587,
            smtp_username: String::new(),
            smtp_password: String::new(),
            company_name: "Acme Supplies".to_string(),
            company_email: "sales@acme.example".to_string(),
            company_phone: "+1 555 0100".to_string(),
            send_timeout_secs: 1,
        },
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        database_pool,
        notifier: Arc::new(NullNotifier),
    }
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn contact_submission_with_invalid_email_is_rejected() {
    let app = storefront::create_app(test_config());

    let response = app
        .oneshot(json_request(
            "POST",
            "/contact",
            json!({
                "name": "Jane",
                "email": "not-an-email",
                "message": "Need a quote"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn contact_submission_with_missing_message_is_rejected() {
    let app = storefront::create_app(test_config());

    // Fails JSON deserialization before the handler runs.
    let response = app
        .oneshot(json_request(
            "POST",
            "/contact",
            json!({
                "name": "Jane",
                "email": "jane@example.com"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn blank_status_update_is_rejected() {
    let app = storefront::create_app(test_config());

    let response = app
        .oneshot(json_request(
            "PUT",
            "/contact/admin/SE-20260101-AAAA/status",
            json!({ "status": "" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn product_with_empty_name_is_rejected() {
    let app = storefront::create_app(test_config());

    let response = app
        .oneshot(json_request("POST", "/products", json!({ "name": "" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn csv_upload_without_file_field_is_rejected() {
    let app = storefront::create_app(test_config());

    let boundary = "test-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"notes\"\r\n\r\nhello\r\n--{b}--\r\n",
        b = boundary
    );

    let request = Request::builder()
        .method("POST")
        .uri("/products/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = storefront::create_app(test_config());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/orders")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
