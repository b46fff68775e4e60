use sqlx::PgPool;

use crate::middleware::error_handling::Result;
use crate::models::contact_message::{ContactMessage, NewContactMessage};

pub struct ContactMessageRepository {
    pool: PgPool,
}

impl ContactMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, message: &NewContactMessage) -> Result<ContactMessage> {
        let saved = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages
                (reference_code, name, email, phone, message, product_ids, product_names, created_at, is_read, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, reference_code, name, email, phone, message, product_ids, product_names, created_at, is_read, status
            "#,
        )
        .bind(&message.reference_code)
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.phone)
        .bind(&message.message)
        .bind(&message.product_ids)
        .bind(&message.product_names)
        .bind(message.created_at)
        .bind(message.is_read)
        .bind(&message.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    pub async fn find_by_reference_code(&self, reference_code: &str) -> Result<Option<ContactMessage>> {
        let message = sqlx::query_as::<_, ContactMessage>(
            r#"
            SELECT id, reference_code, name, email, phone, message, product_ids, product_names, created_at, is_read, status
            FROM contact_messages
            WHERE reference_code = $1
            "#,
        )
        .bind(reference_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(message)
    }

    pub async fn find_all_newest_first(&self) -> Result<Vec<ContactMessage>> {
        let messages = sqlx::query_as::<_, ContactMessage>(
            r#"
            SELECT id, reference_code, name, email, phone, message, product_ids, product_names, created_at, is_read, status
            FROM contact_messages
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    pub async fn find_unread_newest_first(&self) -> Result<Vec<ContactMessage>> {
        let messages = sqlx::query_as::<_, ContactMessage>(
            r#"
            SELECT id, reference_code, name, email, phone, message, product_ids, product_names, created_at, is_read, status
            FROM contact_messages
            WHERE is_read = FALSE
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    /// Sets the status verbatim and forces the read flag. Returns `None` when
    /// the reference code is unknown.
    pub async fn set_status(
        &self,
        reference_code: &str,
        status: &str,
    ) -> Result<Option<ContactMessage>> {
        let updated = sqlx::query_as::<_, ContactMessage>(
            r#"
            UPDATE contact_messages
            SET status = $2, is_read = TRUE
            WHERE reference_code = $1
            RETURNING id, reference_code, name, email, phone, message, product_ids, product_names, created_at, is_read, status
            "#,
        )
        .bind(reference_code)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Marks the inquiry as read without touching its status.
    pub async fn mark_read(&self, reference_code: &str) -> Result<Option<ContactMessage>> {
        let updated = sqlx::query_as::<_, ContactMessage>(
            r#"
            UPDATE contact_messages
            SET is_read = TRUE
            WHERE reference_code = $1
            RETURNING id, reference_code, name, email, phone, message, product_ids, product_names, created_at, is_read, status
            "#,
        )
        .bind(reference_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }
}
