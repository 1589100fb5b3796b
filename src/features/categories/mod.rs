//! Catalog categories feature.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/categories` | No | List all categories |
//! | GET | `/categories/{category_id}` | No | Get category by id |
//! | POST | `/categories` | Admin | Create category |
//! | PUT | `/categories/{category_id}` | Admin | Replace category |
//! | DELETE | `/categories/{category_id}` | Admin | Delete category |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod stores;

pub use services::CategoryService;
pub use stores::PgCategoryStore;
