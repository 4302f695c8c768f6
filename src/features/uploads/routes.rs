use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::features::uploads::handlers::upload_file;
use crate::features::uploads::services::UploadService;

/// Multipart framing allowance on top of the file size limit
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

pub fn routes(service: Arc<UploadService>) -> Router {
    let body_limit = service.max_file_size() + MULTIPART_OVERHEAD;

    Router::new()
        .route(
            "/upload",
            post(upload_file).layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(service)
}
