use sqlx::PgPool;

use crate::middleware::error_handling::Result;
use crate::models::product::{Product, ProductRequest};

pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &ProductRequest) -> Result<Product> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, image_url, category)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, image_url, category
            "#,
        )
        .bind(&request.name)
        .bind(&request.description)
        .bind(&request.image_url)
        .bind(&request.category)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn find_all(&self) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, image_url, category FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, image_url, category FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Ids with no matching row are silently absent from the result.
    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, image_url, category FROM products WHERE id = ANY($1) ORDER BY id",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    pub async fn update(&self, id: i32, request: &ProductRequest) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $2, description = $3, image_url = $4, category = $5
            WHERE id = $1
            RETURNING id, name, description, image_url, category
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(&request.image_url)
        .bind(&request.category)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn delete(&self, id: i32) -> Result<u64> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Inserts all rows inside a single transaction: either every row
    /// persists or none do.
    pub async fn bulk_insert(&self, products: &[ProductRequest]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        for product in products {
            sqlx::query(
                "INSERT INTO products (name, description, image_url, category) VALUES ($1, $2, $3, $4)",
            )
            .bind(&product.name)
            .bind(&product.description)
            .bind(&product.image_url)
            .bind(&product.category)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(products.len() as u64)
    }
}
