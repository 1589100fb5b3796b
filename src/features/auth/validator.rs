use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::time::Duration;

use super::model::AuthenticatedUser;
use crate::core::error::AppError;

/// Validates HS256 bearer tokens minted by the identity provider.
///
/// Token issuance (login, refresh, role assignment) lives outside this
/// service; only validation happens here.
pub struct JwtValidator {
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
    leeway: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    // Standard JWT claims (validated by jsonwebtoken library)
    sub: String,
    #[serde(rename = "iss")]
    _iss: String,
    #[serde(rename = "aud")]
    _aud: String,
    #[serde(rename = "exp")]
    _exp: u64,

    #[serde(default)]
    roles: Vec<String>,
}

impl JwtValidator {
    pub fn new(secret: &str, issuer: String, audience: String, leeway: Duration) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
            leeway: leeway.as_secs(),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.leeway = self.leeway;
        validation.validate_nbf = true;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;

        let claims = token_data.claims;

        Ok(AuthenticatedUser {
            sub: claims.sub,
            roles: claims.roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;
    use std::time::{SystemTime, UNIX_EPOCH};

    const SECRET: &str = "test-secret";
    const ISSUER: &str = "https://id.example.test";
    const AUDIENCE: &str = "storefront-api";

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        iss: String,
        aud: String,
        iat: u64,
        exp: u64,
        roles: Vec<String>,
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    fn mint(secret: &str, exp: u64, roles: Vec<&str>) -> String {
        let claims = TestClaims {
            sub: "user-42".to_string(),
            iss: ISSUER.to_string(),
            aud: AUDIENCE.to_string(),
            iat: now(),
            exp,
            roles: roles.into_iter().map(String::from).collect(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn validator() -> JwtValidator {
        JwtValidator::new(
            SECRET,
            ISSUER.to_string(),
            AUDIENCE.to_string(),
            Duration::from_secs(0),
        )
    }

    #[test]
    fn accepts_well_formed_token_and_extracts_roles() {
        let token = mint(SECRET, now() + 3600, vec!["admin", "shopper"]);
        let user = validator().validate_token(&token).unwrap();
        assert_eq!(user.sub, "user-42");
        assert!(user.is_admin());
    }

    #[test]
    fn rejects_token_signed_with_wrong_secret() {
        let token = mint("other-secret", now() + 3600, vec!["admin"]);
        let err = validator().validate_token(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn rejects_expired_token() {
        let token = mint(SECRET, now() - 3600, vec!["admin"]);
        let err = validator().validate_token(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn token_without_roles_claim_yields_no_roles() {
        #[derive(Serialize)]
        struct BareClaims {
            sub: String,
            iss: String,
            aud: String,
            exp: u64,
        }
        let claims = BareClaims {
            sub: "user-7".to_string(),
            iss: ISSUER.to_string(),
            aud: AUDIENCE.to_string(),
            exp: now() + 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let user = validator().validate_token(&token).unwrap();
        assert!(user.roles.is_empty());
        assert!(!user.is_admin());
    }
}
