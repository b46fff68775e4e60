use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;
use validator::Validate;

use crate::{
    config::AppConfig,
    middleware::error_handling::Result,
    models::contact_message::{
        ContactMessage, ContactRequest, ContactSubmissionResponse, TrackInquiryResponse,
        UpdateStatusRequest,
    },
    repositories::{ContactMessageRepository, ProductRepository},
    services::ContactService,
};

fn contact_service(config: &AppConfig) -> ContactService {
    ContactService::new(
        ContactMessageRepository::new(config.database_pool.clone()),
        ProductRepository::new(config.database_pool.clone()),
        config.notifier.clone(),
        config.mail.clone(),
    )
}

pub async fn submit_contact(
    State(config): State<AppConfig>,
    Json(request): Json<ContactRequest>,
) -> Result<Json<ContactSubmissionResponse>> {
    request.validate()?;

    let saved = contact_service(&config).submit_inquiry(request).await?;

    Ok(Json(ContactSubmissionResponse {
        success: true,
        message: "Quote request submitted successfully!".to_string(),
        reference_code: saved.reference_code,
        message_id: saved.id,
    }))
}

/// Public status lookup by reference code.
pub async fn track_inquiry(
    State(config): State<AppConfig>,
    Path(reference_code): Path<String>,
) -> Result<Json<TrackInquiryResponse>> {
    let message = contact_service(&config)
        .find_by_reference_code(&reference_code)
        .await?;

    Ok(Json(message.into()))
}

pub async fn get_all_inquiries(
    State(config): State<AppConfig>,
) -> Result<Json<Vec<ContactMessage>>> {
    let messages = contact_service(&config).list_all().await?;
    Ok(Json(messages))
}

pub async fn get_unread_inquiries(
    State(config): State<AppConfig>,
) -> Result<Json<Vec<ContactMessage>>> {
    let messages = contact_service(&config).list_unread().await?;
    Ok(Json(messages))
}

pub async fn get_inquiry_details(
    State(config): State<AppConfig>,
    Path(reference_code): Path<String>,
) -> Result<Json<ContactMessage>> {
    let message = contact_service(&config)
        .find_by_reference_code(&reference_code)
        .await?;

    Ok(Json(message))
}

pub async fn update_inquiry_status(
    State(config): State<AppConfig>,
    Path(reference_code): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<serde_json::Value>> {
    request.validate()?;

    contact_service(&config)
        .update_status(&reference_code, &request.status)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Status updated successfully"
    })))
}

pub async fn mark_inquiry_read(
    State(config): State<AppConfig>,
    Path(reference_code): Path<String>,
) -> Result<Json<serde_json::Value>> {
    contact_service(&config).mark_read(&reference_code).await?;

    Ok(Json(json!({ "success": true })))
}
