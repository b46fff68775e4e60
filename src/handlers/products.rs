use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use validator::Validate;

use crate::{
    config::AppConfig,
    middleware::error_handling::{AppError, Result},
    models::product::{Product, ProductRequest},
    repositories::ProductRepository,
    services::ProductService,
};

fn product_service(config: &AppConfig) -> ProductService {
    ProductService::new(ProductRepository::new(config.database_pool.clone()))
}

pub async fn create_product(
    State(config): State<AppConfig>,
    Json(request): Json<ProductRequest>,
) -> Result<Json<Product>> {
    request.validate()?;

    let product = product_service(&config).create(request).await?;
    Ok(Json(product))
}

pub async fn get_all_products(State(config): State<AppConfig>) -> Result<Json<Vec<Product>>> {
    let products = product_service(&config).get_all().await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(config): State<AppConfig>,
    Path(id): Path<i32>,
) -> Result<Json<Product>> {
    let product = product_service(&config).get_by_id(id).await?;
    Ok(Json(product))
}

pub async fn update_product(
    State(config): State<AppConfig>,
    Path(id): Path<i32>,
    Json(request): Json<ProductRequest>,
) -> Result<Json<Product>> {
    request.validate()?;

    let product = product_service(&config).update(id, request).await?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(config): State<AppConfig>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    product_service(&config).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Multipart CSV upload; the file is expected in a `file` field.
pub async fn upload_products_csv(
    State(config): State<AppConfig>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>> {
    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart data: {}", e)))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == "file" {
            file_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?
                    .to_vec(),
            );
        }
    }

    let file_data =
        file_data.ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;

    let imported = product_service(&config).import_csv(&file_data).await?;

    Ok(Json(json!({ "success": true, "imported": imported })))
}
