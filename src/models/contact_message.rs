use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

pub const INITIAL_STATUS: &str = "PENDING";

/// A customer quote request. `product_ids` and `product_names` are
/// denormalized snapshots taken at submission time; deleting or renaming a
/// product later does not touch historical inquiries.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: i64,
    pub reference_code: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub product_ids: Option<String>,
    pub product_names: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
    pub status: String,
}

/// Not-yet-persisted inquiry. The reference code and creation timestamp are
/// assigned here, once, and never regenerated afterwards.
#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub reference_code: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub product_ids: Option<String>,
    pub product_names: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
    pub status: String,
}

impl NewContactMessage {
    pub fn new(
        name: String,
        email: String,
        phone: Option<String>,
        message: String,
        product_ids: Option<String>,
        product_names: Option<String>,
    ) -> Self {
        Self {
            reference_code: generate_reference_code(),
            name,
            email,
            phone,
            message,
            product_ids,
            product_names,
            created_at: Utc::now(),
            is_read: false,
            status: INITIAL_STATUS.to_string(),
        }
    }
}

/// Format: `SE-YYYYMMDD-XXXX`, e.g. `SE-20260209-A7B3`. The random part is
/// the first four hex digits of a v4 UUID, uppercased. Collisions are left to
/// the unique constraint on the column; no retry.
fn generate_reference_code() -> String {
    let date_part = Utc::now().format("%Y%m%d");
    let random_part = Uuid::new_v4().simple().to_string()[..4].to_uppercase();
    format!("SE-{}-{}", date_part, random_part)
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Message cannot be empty"))]
    pub message: String,
    #[serde(default)]
    pub product_ids: Option<Vec<i32>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    #[validate(length(min = 1, message = "Status cannot be empty"))]
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmissionResponse {
    pub success: bool,
    pub message: String,
    pub reference_code: String,
    pub message_id: i64,
}

/// Public tracking view: enough for a customer to check progress without
/// exposing the full admin record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackInquiryResponse {
    pub success: bool,
    pub reference_code: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub product_names: Option<String>,
    pub message: String,
}

impl From<ContactMessage> for TrackInquiryResponse {
    fn from(msg: ContactMessage) -> Self {
        Self {
            success: true,
            reference_code: msg.reference_code,
            status: msg.status,
            created_at: msg.created_at,
            product_names: msg.product_names,
            message: msg.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_code_has_expected_shape() {
        let code = generate_reference_code();

        let parts: Vec<&str> = code.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "SE");
        assert_eq!(parts[1].len(), 8);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 4);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn new_inquiry_starts_pending_and_unread() {
        let inquiry = NewContactMessage::new(
            "Jane".to_string(),
            "jane@example.com".to_string(),
            None,
            "Need a quote".to_string(),
            None,
            None,
        );

        assert_eq!(inquiry.status, INITIAL_STATUS);
        assert!(!inquiry.is_read);
        assert!(inquiry.reference_code.starts_with("SE-"));
    }

    #[test]
    fn track_response_carries_snapshot_fields() {
        let msg = ContactMessage {
            id: 7,
            reference_code: "SE-20260209-A7B3".to_string(),
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
            message: "Need a quote".to_string(),
            product_ids: Some("1,2".to_string()),
            product_names: Some("Widget".to_string()),
            created_at: Utc::now(),
            is_read: false,
            status: INITIAL_STATUS.to_string(),
        };

        let response = TrackInquiryResponse::from(msg);
        assert!(response.success);
        assert_eq!(response.reference_code, "SE-20260209-A7B3");
        assert_eq!(response.product_names.as_deref(), Some("Widget"));
        assert_eq!(response.status, "PENDING");
    }
}
