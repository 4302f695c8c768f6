use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::features::prompts::{handlers, services::PromptService};

/// Public routes: approved listing, submission and tags
pub fn public_routes(service: Arc<PromptService>) -> Router {
    Router::new()
        .route(
            "/prompts",
            get(handlers::list_prompts).post(handlers::submit_prompt),
        )
        .route("/tags", get(handlers::list_tags))
        .with_state(service)
}

/// Admin routes for moderation; mounted behind the bearer middleware
pub fn admin_routes(service: Arc<PromptService>) -> Router {
    Router::new()
        .route(
            "/admin/prompts",
            get(handlers::admin_list_prompts).post(handlers::admin_create_prompt),
        )
        .route("/admin/prompts/search", get(handlers::admin_search_prompts))
        .route(
            "/admin/prompts/{id}",
            put(handlers::update_prompt).delete(handlers::delete_prompt),
        )
        .route("/admin/tags", get(handlers::admin_list_tags))
        .with_state(service)
}
