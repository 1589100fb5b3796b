use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::features::products::dtos::ProductResponseDto;
use crate::features::products::services::ProductService;
use crate::shared::types::ErrorResponse;

/// List the products in a category
#[utoipa::path(
    get,
    path = "/categories/{category_id}/products",
    params(
        ("category_id" = i32, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Products in the category", body = Vec<ProductResponseDto>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "products"
)]
pub async fn list_products_by_category(
    State(service): State<Arc<ProductService>>,
    Path(category_id): Path<i32>,
) -> Result<Json<Vec<ProductResponseDto>>> {
    let products = service.list_by_category_id(category_id).await?;
    Ok(Json(products))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rust_decimal::Decimal;

    use crate::features::products::routes;
    use crate::features::products::services::ProductService;
    use crate::shared::test_helpers::{FailingProductStore, InMemoryProductStore};

    use super::*;

    fn server_with(store: Arc<InMemoryProductStore>) -> TestServer {
        let service = Arc::new(ProductService::new(store));
        TestServer::new(routes::routes(service)).unwrap()
    }

    #[tokio::test]
    async fn lists_only_products_of_the_requested_category() {
        let store = Arc::new(InMemoryProductStore::default());
        store.add(1, "Cordless Drill", Decimal::new(12999, 2));
        store.add(1, "Claw Hammer", Decimal::new(1850, 2));
        store.add(2, "Desk Lamp", Decimal::new(3499, 2));
        let server = server_with(store);

        let response = server.get("/categories/1/products").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let products: Vec<ProductResponseDto> = response.json();
        assert_eq!(products.len(), 2);
        assert!(products.iter().all(|p| p.category_id == 1));
    }

    #[tokio::test]
    async fn category_without_products_yields_empty_array() {
        let server = server_with(Arc::new(InMemoryProductStore::default()));

        let response = server.get("/categories/9/products").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let products: Vec<ProductResponseDto> = response.json();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_internal_server_error() {
        let service = Arc::new(ProductService::new(Arc::new(FailingProductStore)));
        let server = TestServer::new(routes::routes(service)).unwrap();

        let response = server.get("/categories/1/products").await;
        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
