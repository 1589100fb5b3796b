use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Caller identity resolved from a validated access token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    /// Check if user has a specific role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Check if user may manage the catalog (create, replace, delete categories)
    pub fn is_admin(&self) -> bool {
        self.has_role("admin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_role_grants_catalog_management() {
        let user = AuthenticatedUser {
            sub: "user-1".to_string(),
            roles: vec!["shopper".to_string(), "admin".to_string()],
        };
        assert!(user.is_admin());
        assert!(user.has_role("shopper"));
    }

    #[test]
    fn shopper_is_not_admin() {
        let user = AuthenticatedUser {
            sub: "user-2".to_string(),
            roles: vec!["shopper".to_string()],
        };
        assert!(!user.is_admin());
        assert!(!user.has_role("admin"));
    }
}
