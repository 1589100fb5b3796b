use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::products::dtos::ProductResponseDto;
use crate::features::products::stores::ProductStore;

/// Service for product reads
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// List the products of one category.
    ///
    /// An unknown category id is indistinguishable from an empty category
    /// here; both return an empty list.
    pub async fn list_by_category_id(&self, category_id: i32) -> Result<Vec<ProductResponseDto>> {
        let products = self.store.list_by_category_id(category_id).await.map_err(|e| {
            tracing::error!("Failed to list products for category {}: {:?}", category_id, e);
            AppError::Store(e)
        })?;

        Ok(products.into_iter().map(|p| p.into()).collect())
    }
}
