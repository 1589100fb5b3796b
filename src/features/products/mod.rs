//! Catalog products feature.
//!
//! Read-only here: product writes belong to the inventory side of the
//! platform. This feature only exposes the category relation.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/categories/{category_id}/products` | No | List products in a category |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod stores;

pub use services::ProductService;
pub use stores::PgProductStore;
