use crate::features::auth::handlers;
use crate::features::auth::services::TokenService;
use axum::{routing::post, Router};
use std::sync::Arc;

/// Public auth routes (no authentication required)
pub fn public_routes(service: Arc<TokenService>) -> Router {
    Router::new()
        .route("/token", post(handlers::login))
        .with_state(service)
}
