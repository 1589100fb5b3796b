use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::categories::models::Category;

/// Response DTO for a category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i32,
    pub name: String,
    pub description: String,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
        }
    }
}

/// Request payload for creating or replacing a category.
///
/// Ids are never client-supplied; the store assigns one on creation and
/// the replace target comes from the URL path.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryRequestDto {
    pub name: String,
    #[serde(default)]
    pub description: String,
}
