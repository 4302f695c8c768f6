use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Multipart body for Swagger UI only; the handler reads `Multipart` directly
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadFileDto {
    /// The image to store
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponseDto {
    /// Public URL of the stored file
    #[schema(example = "http://localhost:8000/uploads/0b6f4c1e-8a51-4d57-9a3c-2f8a6e5e9d10.png")]
    pub url: String,
}
