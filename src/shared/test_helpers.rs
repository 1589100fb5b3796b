#[cfg(test)]
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
#[cfg(test)]
use std::sync::Mutex;

#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use axum::{extract::Request, middleware::Next, Router};
#[cfg(test)]
use chrono::Utc;
#[cfg(test)]
use rust_decimal::Decimal;

#[cfg(test)]
use crate::core::error::StoreError;
#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;
#[cfg(test)]
use crate::features::categories::models::Category;
#[cfg(test)]
use crate::features::categories::stores::{CategoryStore, NewCategory};
#[cfg(test)]
use crate::features::products::models::Product;
#[cfg(test)]
use crate::features::products::stores::ProductStore;

#[cfg(test)]
pub fn admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "test-admin".to_string(),
        roles: vec!["admin".to_string()],
    }
}

#[cfg(test)]
pub fn shopper_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "test-shopper".to_string(),
        roles: vec!["shopper".to_string()],
    }
}

/// Wrap a router so every request carries the given caller identity,
/// standing in for the bearer-token middleware.
#[cfg(test)]
pub fn with_auth_user(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
        },
    ))
}

/// Category store double backed by a Vec.
///
/// `calls` counts every store method invocation so tests can assert that
/// denied requests never reach the store.
#[cfg(test)]
#[derive(Default)]
pub struct InMemoryCategoryStore {
    categories: Mutex<Vec<Category>>,
    next_id: AtomicI32,
    pub calls: AtomicUsize,
}

#[cfg(test)]
impl InMemoryCategoryStore {
    pub fn with_categories(seed: &[(&str, &str)]) -> Self {
        let store = Self::default();
        {
            let mut categories = store.categories.lock().unwrap();
            for (name, description) in seed {
                let id = store.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                categories.push(Category {
                    id,
                    name: name.to_string(),
                    description: description.to_string(),
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                });
            }
        }
        store
    }
}

#[cfg(test)]
#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn list(&self) -> Result<Vec<Category>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn get_by_id(&self, category_id: i32) -> Result<Option<Category>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == category_id)
            .cloned())
    }

    async fn create(&self, category: NewCategory) -> Result<Category, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = Category {
            id,
            name: category.name,
            description: category.description,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.categories.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, category_id: i32, category: NewCategory) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(existing) = self
            .categories
            .lock()
            .unwrap()
            .iter_mut()
            .find(|c| c.id == category_id)
        {
            existing.name = category.name;
            existing.description = category.description;
            existing.updated_at = Utc::now();
        }
        // Replacing an absent id is accepted, matching the Postgres store.
        Ok(())
    }

    async fn delete(&self, category_id: i32) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.categories
            .lock()
            .unwrap()
            .retain(|c| c.id != category_id);
        Ok(())
    }
}

/// Category store double whose every call fails with a backend error.
#[cfg(test)]
pub struct FailingCategoryStore;

#[cfg(test)]
#[async_trait]
impl CategoryStore for FailingCategoryStore {
    async fn list(&self) -> Result<Vec<Category>, StoreError> {
        Err(StoreError::Backend("connection reset".to_string()))
    }

    async fn get_by_id(&self, _category_id: i32) -> Result<Option<Category>, StoreError> {
        Err(StoreError::Backend("connection reset".to_string()))
    }

    async fn create(&self, _category: NewCategory) -> Result<Category, StoreError> {
        Err(StoreError::Backend("connection reset".to_string()))
    }

    async fn update(&self, _category_id: i32, _category: NewCategory) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection reset".to_string()))
    }

    async fn delete(&self, _category_id: i32) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection reset".to_string()))
    }
}

/// Product store double backed by a Vec
#[cfg(test)]
#[derive(Default)]
pub struct InMemoryProductStore {
    products: Mutex<Vec<Product>>,
    next_id: AtomicI32,
}

#[cfg(test)]
impl InMemoryProductStore {
    pub fn add(&self, category_id: i32, name: &str, price: Decimal) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.products.lock().unwrap().push(Product {
            id,
            category_id,
            name: name.to_string(),
            description: String::new(),
            price,
            stock: 10,
            image_url: None,
            featured: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
    }
}

#[cfg(test)]
#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list_by_category_id(&self, category_id: i32) -> Result<Vec<Product>, StoreError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect())
    }
}

/// Product store double whose every call fails with a backend error.
#[cfg(test)]
pub struct FailingProductStore;

#[cfg(test)]
#[async_trait]
impl ProductStore for FailingProductStore {
    async fn list_by_category_id(&self, _category_id: i32) -> Result<Vec<Product>, StoreError> {
        Err(StoreError::Backend("connection reset".to_string()))
    }
}
