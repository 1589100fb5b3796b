use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::products::handlers;
use crate::features::products::services::ProductService;

/// Create routes for the products feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route(
            "/categories/{category_id}/products",
            get(handlers::list_products_by_category),
        )
        .with_state(service)
}
