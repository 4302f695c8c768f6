use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Form-encoded login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequestDto {
    pub username: String,
    pub password: String,
}

/// Bearer token issued on successful login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponseDto {
    /// Signed JWT access token
    pub access_token: String,
    /// Token type (always "bearer")
    pub token_type: String,
}
