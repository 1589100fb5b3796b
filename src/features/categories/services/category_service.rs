use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CategoryRequestDto, CategoryResponseDto};
use crate::features::categories::stores::{CategoryStore, NewCategory};

/// Service for category operations
pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        Self { store }
    }

    /// List all categories, ordered by id
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.store.list().await.map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Store(e)
        })?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Get a category by id.
    ///
    /// A store miss maps to 404. A store failure maps to 500 and, unlike
    /// the other operations, carries the underlying message in the body.
    pub async fn get_by_id(&self, category_id: i32) -> Result<CategoryResponseDto> {
        let category = self.store.get_by_id(category_id).await.map_err(|e| {
            tracing::error!("Failed to get category {}: {:?}", category_id, e);
            AppError::Internal(format!("Error retrieving category: {}", e))
        })?;

        category
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", category_id)))
    }

    /// Insert a category; the store assigns the id
    pub async fn create(&self, dto: CategoryRequestDto) -> Result<CategoryResponseDto> {
        let created = self
            .store
            .create(NewCategory {
                name: dto.name,
                description: dto.description,
            })
            .await
            .map_err(|e| {
                tracing::error!("Failed to create category: {:?}", e);
                AppError::Store(e)
            })?;

        Ok(created.into())
    }

    /// Replace the category stored under `category_id`.
    ///
    /// Whether replacing an absent id succeeds is store-defined; this
    /// layer only propagates failures.
    pub async fn update(&self, category_id: i32, dto: CategoryRequestDto) -> Result<()> {
        self.store
            .update(
                category_id,
                NewCategory {
                    name: dto.name,
                    description: dto.description,
                },
            )
            .await
            .map_err(|e| {
                tracing::error!("Failed to update category {}: {:?}", category_id, e);
                AppError::Store(e)
            })
    }

    pub async fn delete(&self, category_id: i32) -> Result<()> {
        self.store.delete(category_id).await.map_err(|e| {
            tracing::error!("Failed to delete category {}: {:?}", category_id, e);
            AppError::Store(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{FailingCategoryStore, InMemoryCategoryStore};

    #[tokio::test]
    async fn get_by_id_failure_carries_store_message() {
        let service = CategoryService::new(Arc::new(FailingCategoryStore));

        let err = service.get_by_id(1).await.unwrap_err();
        match err {
            AppError::Internal(msg) => {
                assert!(msg.starts_with("Error retrieving category:"));
                assert!(msg.contains("connection reset"));
            }
            other => panic!("expected Internal, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn list_failure_maps_to_store_error() {
        let service = CategoryService::new(Arc::new(FailingCategoryStore));

        let err = service.list().await.unwrap_err();
        assert!(matches!(err, AppError::Store(_)));
    }

    #[tokio::test]
    async fn get_by_id_miss_maps_to_not_found() {
        let service = CategoryService::new(Arc::new(InMemoryCategoryStore::default()));

        let err = service.get_by_id(99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
