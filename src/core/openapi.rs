use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::prompts::{dtos as prompts_dtos, handlers as prompts_handlers, models};
use crate::features::uploads::{dtos as uploads_dtos, handlers as uploads_handlers};
use crate::shared::types::{ErrorResponse, MessageResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::login,
        // Prompts (public)
        prompts_handlers::list_prompts,
        prompts_handlers::submit_prompt,
        prompts_handlers::list_tags,
        // Prompts (admin)
        prompts_handlers::admin_list_prompts,
        prompts_handlers::admin_create_prompt,
        prompts_handlers::admin_search_prompts,
        prompts_handlers::update_prompt,
        prompts_handlers::delete_prompt,
        prompts_handlers::admin_list_tags,
        // Uploads
        uploads_handlers::upload_file,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            MessageResponse,
            // Auth
            auth::dtos::LoginRequestDto,
            auth::dtos::TokenResponseDto,
            // Prompts
            models::Prompt,
            models::Category,
            prompts_dtos::CreatePromptDto,
            prompts_dtos::UpdatePromptDto,
            // Uploads
            uploads_dtos::UploadFileDto,
            uploads_dtos::UploadResponseDto,
        )
    ),
    tags(
        (name = "auth", description = "Admin token issuance"),
        (name = "prompts", description = "Public prompt gallery and submissions"),
        (name = "admin", description = "Prompt moderation (admin only)"),
        (name = "uploads", description = "Preview image uploads"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Prompt Center API",
        version = "0.1.0",
        description = "Prompt submission and moderation API",
    )
)]
pub struct ApiDoc;

/// Adds the bearer JWT scheme referenced by admin paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Overrides the document info with configured values
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
