use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::StoreError;
use crate::features::products::models::Product;

/// Persistence seam for products.
///
/// The catalog service only reads the category relation; product writes
/// are owned elsewhere.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Products belonging to the given category, ordered by id. A
    /// category with no products yields an empty list.
    async fn list_by_category_id(&self, category_id: i32) -> Result<Vec<Product>, StoreError>;
}

/// Postgres-backed product store
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list_by_category_id(&self, category_id: i32) -> Result<Vec<Product>, StoreError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, category_id, name, description, price, stock,
                   image_url, featured, created_at, updated_at
            FROM products
            WHERE category_id = $1
            ORDER BY id
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }
}
