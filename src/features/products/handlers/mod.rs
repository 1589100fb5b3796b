pub mod product_handler;

pub use product_handler::{__path_list_products_by_category, list_products_by_category};
