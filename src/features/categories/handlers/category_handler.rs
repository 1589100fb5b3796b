use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::categories::dtos::{CategoryRequestDto, CategoryResponseDto};
use crate::features::categories::services::CategoryService;
use crate::shared::types::ErrorResponse;

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "List of categories", body = Vec<CategoryResponseDto>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<Vec<CategoryResponseDto>>> {
    let categories = service.list().await?;
    Ok(Json(categories))
}

/// Get a category by id
#[utoipa::path(
    get,
    path = "/categories/{category_id}",
    params(
        ("category_id" = i32, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponseDto),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(category_id): Path<i32>,
) -> Result<Json<CategoryResponseDto>> {
    let category = service.get_by_id(category_id).await?;
    Ok(Json(category))
}

/// Create a category (admin only)
#[utoipa::path(
    post,
    path = "/categories",
    request_body = CategoryRequestDto,
    responses(
        (status = 201, description = "Category created", body = CategoryResponseDto),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_category(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CategoryRequestDto>,
) -> Result<(StatusCode, Json<CategoryResponseDto>)> {
    let created = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace a category by id (admin only)
#[utoipa::path(
    put,
    path = "/categories/{category_id}",
    params(
        ("category_id" = i32, Path, description = "Category id")
    ),
    request_body = CategoryRequestDto,
    responses(
        (status = 200, description = "Category replaced"),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_category(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CategoryService>>,
    Path(category_id): Path<i32>,
    AppJson(dto): AppJson<CategoryRequestDto>,
) -> Result<StatusCode> {
    service.update(category_id, dto).await?;
    Ok(StatusCode::OK)
}

/// Delete a category by id (admin only)
#[utoipa::path(
    delete,
    path = "/categories/{category_id}",
    params(
        ("category_id" = i32, Path, description = "Category id")
    ),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_category(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CategoryService>>,
    Path(category_id): Path<i32>,
) -> Result<StatusCode> {
    service.delete(category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::features::categories::routes;
    use crate::features::categories::services::CategoryService;
    use crate::shared::test_helpers::{
        admin_user, shopper_user, with_auth_user, FailingCategoryStore, InMemoryCategoryStore,
    };

    use super::*;

    fn server_with(store: Arc<InMemoryCategoryStore>) -> TestServer {
        let service = Arc::new(CategoryService::new(store));
        TestServer::new(routes::routes(service)).unwrap()
    }

    fn admin_server_with(store: Arc<InMemoryCategoryStore>) -> TestServer {
        let service = Arc::new(CategoryService::new(store));
        TestServer::new(with_auth_user(routes::routes(service), admin_user())).unwrap()
    }

    fn shopper_server_with(store: Arc<InMemoryCategoryStore>) -> TestServer {
        let service = Arc::new(CategoryService::new(store));
        TestServer::new(with_auth_user(routes::routes(service), shopper_user())).unwrap()
    }

    #[tokio::test]
    async fn list_returns_all_categories() {
        let store = Arc::new(InMemoryCategoryStore::with_categories(&[
            ("Electronics", "Gadgets and devices"),
            ("Fashion", "Clothing and accessories"),
        ]));
        let server = server_with(store);

        let response = server.get("/categories").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let categories: Vec<CategoryResponseDto> = response.json();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "Electronics");
        assert_eq!(categories[1].name, "Fashion");
    }

    #[tokio::test]
    async fn list_of_empty_store_is_empty_array_not_error() {
        let server = server_with(Arc::new(InMemoryCategoryStore::default()));

        let response = server.get("/categories").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let categories: Vec<CategoryResponseDto> = response.json();
        assert!(categories.is_empty());
    }

    #[tokio::test]
    async fn get_by_id_returns_matching_category() {
        let store = Arc::new(InMemoryCategoryStore::with_categories(&[
            ("Electronics", "Gadgets and devices"),
            ("Fashion", "Clothing and accessories"),
        ]));
        let server = server_with(store);

        let response = server.get("/categories/2").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let category: CategoryResponseDto = response.json();
        assert_eq!(category.id, 2);
        assert_eq!(category.name, "Fashion");
    }

    #[tokio::test]
    async fn get_absent_id_is_not_found() {
        let server = server_with(Arc::new(InMemoryCategoryStore::default()));

        let response = server.get("/categories/42").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_assigns_id_and_echoes_fields() {
        let server = admin_server_with(Arc::new(InMemoryCategoryStore::default()));

        let response = server
            .post("/categories")
            .json(&json!({"name": "Tools", "description": "Hand tools"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);

        let created: CategoryResponseDto = response.json();
        assert_eq!(created.id, 1);
        assert_eq!(created.name, "Tools");
        assert_eq!(created.description, "Hand tools");
    }

    #[tokio::test]
    async fn update_replaces_category_and_returns_ok_without_body() {
        let store = Arc::new(InMemoryCategoryStore::with_categories(&[(
            "Tools",
            "Hand tools",
        )]));
        let server = admin_server_with(Arc::clone(&store));

        let response = server
            .put("/categories/1")
            .json(&json!({"name": "Power Tools", "description": "Drills and saws"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert!(response.text().is_empty());

        let get_response = server.get("/categories/1").await;
        let category: CategoryResponseDto = get_response.json();
        assert_eq!(category.name, "Power Tools");
    }

    #[tokio::test]
    async fn update_of_absent_id_still_returns_ok() {
        // The in-memory store, like the Postgres one, accepts a replace of
        // an id with no matching row.
        let server = admin_server_with(Arc::new(InMemoryCategoryStore::default()));

        let response = server
            .put("/categories/42")
            .json(&json!({"name": "Ghost", "description": ""}))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    #[tokio::test]
    async fn delete_returns_no_content_and_category_is_gone() {
        let store = Arc::new(InMemoryCategoryStore::with_categories(&[(
            "Tools",
            "Hand tools",
        )]));
        let server = admin_server_with(Arc::clone(&store));

        let response = server.delete("/categories/1").await;
        assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
        assert!(response.text().is_empty());

        let get_response = server.get("/categories/1").await;
        assert_eq!(get_response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn anonymous_writes_are_unauthorized_before_any_store_call() {
        let store = Arc::new(InMemoryCategoryStore::default());
        let server = server_with(Arc::clone(&store));

        let post = server
            .post("/categories")
            .json(&json!({"name": "Tools", "description": ""}))
            .await;
        assert_eq!(post.status_code(), StatusCode::UNAUTHORIZED);

        let put = server
            .put("/categories/1")
            .json(&json!({"name": "Tools", "description": ""}))
            .await;
        assert_eq!(put.status_code(), StatusCode::UNAUTHORIZED);

        let delete = server.delete("/categories/1").await;
        assert_eq!(delete.status_code(), StatusCode::UNAUTHORIZED);

        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn non_admin_writes_are_forbidden_before_any_store_call() {
        let store = Arc::new(InMemoryCategoryStore::default());
        let server = shopper_server_with(Arc::clone(&store));

        let post = server
            .post("/categories")
            .json(&json!({"name": "Tools", "description": ""}))
            .await;
        assert_eq!(post.status_code(), StatusCode::FORBIDDEN);

        let put = server
            .put("/categories/1")
            .json(&json!({"name": "Tools", "description": ""}))
            .await;
        assert_eq!(put.status_code(), StatusCode::FORBIDDEN);

        let delete = server.delete("/categories/1").await;
        assert_eq!(delete.status_code(), StatusCode::FORBIDDEN);

        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_internal_server_error() {
        let service = Arc::new(CategoryService::new(Arc::new(FailingCategoryStore)));
        let server = TestServer::new(routes::routes(service)).unwrap();

        let response = server.get("/categories").await;
        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn get_by_id_store_failure_includes_store_message() {
        let service = Arc::new(CategoryService::new(Arc::new(FailingCategoryStore)));
        let server = TestServer::new(routes::routes(service)).unwrap();

        let response = server.get("/categories/1").await;
        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: ErrorResponse = response.json();
        let message = body.message.unwrap();
        assert!(message.contains("Error retrieving category:"));
        assert!(message.contains("connection reset"));
    }

    #[tokio::test]
    async fn malformed_payload_is_bad_request() {
        let server = admin_server_with(Arc::new(InMemoryCategoryStore::default()));

        let response = server
            .post("/categories")
            .json(&json!({"name": 7, "description": []}))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }
}
