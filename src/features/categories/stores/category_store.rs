use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::StoreError;
use crate::features::categories::models::Category;

/// New or replacement category data. Ids are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}

/// Persistence seam for categories.
///
/// Implementations must be safe to call from many request tasks at once.
/// Every method is a single attempt; callers map failures straight to an
/// HTTP response.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// All categories, ordered by id.
    async fn list(&self) -> Result<Vec<Category>, StoreError>;

    /// A single category, or `None` when the id has no matching record.
    async fn get_by_id(&self, category_id: i32) -> Result<Option<Category>, StoreError>;

    /// Insert a category and return it with its assigned id.
    async fn create(&self, category: NewCategory) -> Result<Category, StoreError>;

    /// Replace the category stored under `category_id`. Replacing an
    /// absent id is not an error at this layer.
    async fn update(&self, category_id: i32, category: NewCategory) -> Result<(), StoreError>;

    async fn delete(&self, category_id: i32) -> Result<(), StoreError>;
}

/// Postgres-backed category store
pub struct PgCategoryStore {
    pool: PgPool,
}

impl PgCategoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryStore for PgCategoryStore {
    async fn list(&self) -> Result<Vec<Category>, StoreError> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM categories
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn get_by_id(&self, category_id: i32) -> Result<Option<Category>, StoreError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn create(&self, category: NewCategory) -> Result<Category, StoreError> {
        let created = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(&category.name)
        .bind(&category.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update(&self, category_id: i32, category: NewCategory) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE categories
            SET name = $2, description = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(category_id)
        .bind(&category.name)
        .bind(&category.description)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, category_id: i32) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(category_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
