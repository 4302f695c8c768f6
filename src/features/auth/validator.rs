use super::model::{AuthenticatedAdmin, Claims};
use crate::core::config::AuthConfig;
use crate::core::error::AppError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

/// Verifies bearer tokens issued by [`super::services::TokenService`]
pub struct JwtValidator {
    decoding_key: DecodingKey,
    admin_username: String,
    leeway: u64,
}

impl JwtValidator {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            admin_username: config.admin_username.clone(),
            leeway: config.jwt_leeway.as_secs(),
        }
    }

    /// Check signature and expiry, then require the subject to be the admin
    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedAdmin, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!("Rejected bearer token: {}", e);
                AppError::Unauthorized("Invalid token".to_string())
            })?
            .claims;

        if claims.sub != self.admin_username {
            return Err(AppError::Unauthorized("Not authorized".to_string()));
        }

        Ok(AuthenticatedAdmin {
            username: claims.sub,
        })
    }
}
