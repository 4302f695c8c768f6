//! Router assembly shared by the binary and the HTTP tests

use axum::{
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::{AppConfig, SwaggerConfig};
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::auth::services::TokenService;
use crate::features::auth::{routes as auth_routes, JwtValidator};
use crate::features::prompts::{routes as prompts_routes, PromptService};
use crate::features::uploads::{routes as uploads_routes, UploadService};
use crate::shared::constants::UPLOADS_PATH;

/// Everything the router needs, built once at startup
pub struct AppServices {
    pub prompts: Arc<PromptService>,
    pub tokens: Arc<TokenService>,
    pub validator: Arc<JwtValidator>,
    pub uploads: Arc<UploadService>,
    pub upload_dir: PathBuf,
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

fn swagger_routes(config: &SwaggerConfig) -> Router {
    let mut openapi = ApiDoc::openapi();
    SwaggerInfoModifier {
        title: config.title.clone(),
        version: config.version.clone(),
        description: config.description.clone(),
    }
    .modify(&mut openapi);

    let swagger =
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    match config.credentials() {
        Some(credentials) => {
            tracing::info!("Swagger UI basic auth enabled");
            swagger.layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
        }
        None => {
            tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
            swagger
        }
    }
}

pub fn build_app(services: AppServices, app: &AppConfig, swagger: &SwaggerConfig) -> Router {
    // Bearer check runs before any admin handler or store access
    let protected_routes = Router::new()
        .merge(prompts_routes::admin_routes(Arc::clone(&services.prompts)))
        .route_layer(from_fn_with_state(
            services.validator,
            middleware::auth_middleware,
        ));

    let public_routes = Router::new()
        .merge(auth_routes::public_routes(services.tokens))
        .merge(prompts_routes::public_routes(services.prompts))
        .merge(uploads_routes::routes(services.uploads))
        .nest_service(UPLOADS_PATH, ServeDir::new(services.upload_dir))
        .route("/health", get(health_check));

    Router::new()
        .merge(swagger_routes(swagger))
        .merge(protected_routes)
        .merge(public_routes)
        .layer(middleware::cors_layer(app.cors_allowed_origins.clone()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}
