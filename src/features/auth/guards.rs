//! Authorization guard for admin-only handlers.
//!
//! The bearer middleware verifies the token and the admin subject, then stores
//! an [`AuthenticatedAdmin`] in the request extensions; this guard fails with
//! 401 when it is missing.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedAdmin;
use axum::{extract::FromRequestParts, http::request::Parts};

/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(admin): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedAdmin);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedAdmin>()
            .cloned()
            .map(RequireAdmin)
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))
    }
}
