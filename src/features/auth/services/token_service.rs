use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedAdmin, Claims};

/// A freshly issued bearer token
#[derive(Debug)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: i64,
}

/// Issues and verifies HS256 bearer tokens for admin sessions
pub struct TokenService {
    config: AuthConfig,
}

impl TokenService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn issue_token(&self, admin_id: Uuid, email: &str, role: &str) -> Result<IssuedToken> {
        let now = Utc::now().timestamp();
        let expires_in = self.config.token_expiry.as_secs() as i64;

        let claims = Claims {
            sub: admin_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now + expires_in,
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))?;

        Ok(IssuedToken {
            access_token,
            expires_in,
        })
    }

    /// Verify a bearer token and extract the admin identity.
    ///
    /// All failure modes (expired, malformed, wrong signature) collapse into
    /// the same unauthorized error so callers stay uniform.
    pub fn verify_token(&self, token: &str) -> Result<AuthenticatedAdmin> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        let claims = token_data.claims;
        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(AuthenticatedAdmin {
            id,
            email: claims.email,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::ROLE_SUPER_ADMIN;
    use std::time::Duration;

    fn service(expiry: Duration) -> TokenService {
        TokenService::new(AuthConfig {
            jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
            token_expiry: expiry,
        })
    }

    #[test]
    fn issued_token_round_trips() {
        let service = service(Duration::from_secs(3600));
        let admin_id = Uuid::new_v4();

        let issued = service
            .issue_token(admin_id, "admin@example.org", ROLE_SUPER_ADMIN)
            .unwrap();
        assert_eq!(issued.expires_in, 3600);

        let admin = service.verify_token(&issued.access_token).unwrap();
        assert_eq!(admin.id, admin_id);
        assert_eq!(admin.email, "admin@example.org");
        assert!(admin.is_super_admin());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let service = service(Duration::from_secs(3600));
        let issued = service
            .issue_token(Uuid::new_v4(), "admin@example.org", ROLE_SUPER_ADMIN)
            .unwrap();

        let mut tampered = issued.access_token;
        tampered.push('x');
        assert!(matches!(
            service.verify_token(&tampered),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let issuer = service(Duration::from_secs(3600));
        let verifier = TokenService::new(AuthConfig {
            jwt_secret: "ffffffffffffffffffffffffffffffff".to_string(),
            token_expiry: Duration::from_secs(3600),
        });

        let issued = issuer
            .issue_token(Uuid::new_v4(), "admin@example.org", ROLE_SUPER_ADMIN)
            .unwrap();
        assert!(verifier.verify_token(&issued.access_token).is_err());
    }
}
