use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON envelope returned by every failing endpoint.
///
/// Successful responses carry plain resource representations; only errors
/// are wrapped. Clients should treat the shape as informational, not as a
/// guaranteed schema.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(message: Option<String>, errors: Option<Vec<String>>) -> Self {
        Self {
            success: false,
            message,
            errors,
        }
    }
}
