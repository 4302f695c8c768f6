use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{LoginRequestDto, TokenResponseDto};
use crate::features::auth::model::Claims;
use jsonwebtoken::{encode, EncodingKey, Header};
use std::time::Duration;

/// Checks the fixed admin credentials and issues HS256 access tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    admin_username: String,
    admin_password: String,
    token_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            admin_username: config.admin_username.clone(),
            admin_password: config.admin_password.clone(),
            token_ttl: config.token_ttl,
        }
    }

    /// Exchange the admin username/password for a bearer token
    pub fn login(&self, dto: &LoginRequestDto) -> Result<TokenResponseDto> {
        if dto.username != self.admin_username || dto.password != self.admin_password {
            tracing::warn!("Rejected login attempt for '{}'", dto.username);
            return Err(AppError::BadRequest(
                "Incorrect username or password".to_string(),
            ));
        }

        let access_token = self.issue_token(&dto.username)?;
        tracing::info!("Issued access token for '{}'", dto.username);

        Ok(TokenResponseDto {
            access_token,
            token_type: "bearer".to_string(),
        })
    }

    /// Sign a token whose subject is `subject`, expiring after the configured TTL
    pub fn issue_token(&self, subject: &str) -> Result<String> {
        let iat = chrono::Utc::now().timestamp().max(0) as u64;
        let claims = Claims {
            sub: subject.to_string(),
            iat,
            exp: iat.saturating_add(self.token_ttl.as_secs()),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }
}
