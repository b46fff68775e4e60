use std::sync::Arc;

use crate::config::MailConfig;
use crate::middleware::error_handling::{AppError, Result};
use crate::models::contact_message::{ContactMessage, ContactRequest, NewContactMessage};
use crate::models::product::Product;
use crate::repositories::{ContactMessageRepository, ProductRepository};
use crate::services::mailer::{admin_notification, auto_reply, Notifier, OutboundEmail};

pub struct ContactService {
    contact_repo: ContactMessageRepository,
    product_repo: ProductRepository,
    notifier: Arc<dyn Notifier>,
    mail: MailConfig,
}

impl ContactService {
    pub fn new(
        contact_repo: ContactMessageRepository,
        product_repo: ProductRepository,
        notifier: Arc<dyn Notifier>,
        mail: MailConfig,
    ) -> Self {
        Self {
            contact_repo,
            product_repo,
            notifier,
            mail,
        }
    }

    /// Persists the inquiry, then sends the admin alert and the customer
    /// auto-reply. The persist is the durability point: notification failures
    /// are logged and never fail the submission.
    pub async fn submit_inquiry(&self, request: ContactRequest) -> Result<ContactMessage> {
        let (product_ids, product_names) = match request.product_ids.as_deref() {
            Some(ids) if !ids.is_empty() => {
                let found = self.product_repo.find_by_ids(ids).await?;
                let (ids_str, names_str) = snapshot_products(ids, &found);
                (Some(ids_str), Some(names_str))
            }
            _ => (None, None),
        };

        let new_message = NewContactMessage::new(
            request.name,
            request.email,
            request.phone,
            request.message,
            product_ids,
            product_names,
        );

        let saved = self.contact_repo.create(&new_message).await?;

        tracing::info!(
            reference_code = %saved.reference_code,
            id = saved.id,
            "inquiry persisted"
        );

        self.notify(admin_notification(&saved, &self.mail)).await;
        self.notify(auto_reply(&saved, &self.mail)).await;

        Ok(saved)
    }

    /// Best-effort send with a bounded timeout so a slow mail transport
    /// cannot hold the request indefinitely.
    async fn notify(&self, email: OutboundEmail) {
        let timeout = self.mail.send_timeout();
        match tokio::time::timeout(timeout, self.notifier.send(&email)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("failed to send notification to {}: {}", email.to, e),
            Err(_) => tracing::warn!(
                "notification to {} timed out after {:?}",
                email.to,
                timeout
            ),
        }
    }

    pub async fn find_by_reference_code(&self, reference_code: &str) -> Result<ContactMessage> {
        self.contact_repo
            .find_by_reference_code(reference_code)
            .await?
            .ok_or_else(|| AppError::NotFound("Inquiry not found".to_string()))
    }

    pub async fn list_all(&self) -> Result<Vec<ContactMessage>> {
        self.contact_repo.find_all_newest_first().await
    }

    pub async fn list_unread(&self) -> Result<Vec<ContactMessage>> {
        self.contact_repo.find_unread_newest_first().await
    }

    /// Sets the status verbatim (no enumerated state machine) and marks the
    /// inquiry read.
    pub async fn update_status(&self, reference_code: &str, status: &str) -> Result<ContactMessage> {
        self.contact_repo
            .set_status(reference_code, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Inquiry not found".to_string()))
    }

    pub async fn mark_read(&self, reference_code: &str) -> Result<ContactMessage> {
        self.contact_repo
            .mark_read(reference_code)
            .await?
            .ok_or_else(|| AppError::NotFound("Inquiry not found".to_string()))
    }
}

/// Denormalized snapshot of the product selection: the id string keeps every
/// requested id, the name string keeps only the products that were found.
fn snapshot_products(requested: &[i32], found: &[Product]) -> (String, String) {
    let ids = requested
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");

    let names = found
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    (ids, names)
}
