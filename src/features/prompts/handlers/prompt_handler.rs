use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::prompts::dtos::{
    CreatePromptDto, PromptListQuery, PromptQueryParams, PromptSearchParams, UpdatePromptDto,
};
use crate::features::prompts::models::Prompt;
use crate::features::prompts::services::{PromptService, Submission};
use crate::shared::types::{ErrorResponse, MessageResponse};

/// List approved prompts, newest first
#[utoipa::path(
    get,
    path = "/prompts",
    params(PromptQueryParams),
    responses(
        (status = 200, description = "Approved prompts", body = Vec<Prompt>),
        (status = 400, description = "Invalid query", body = ErrorResponse)
    ),
    tag = "prompts"
)]
pub async fn list_prompts(
    State(service): State<Arc<PromptService>>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Prompt>>> {
    let query = PromptListQuery::from_query(query.as_deref())?;
    let prompts = service.list_public(query).await?;
    Ok(Json(prompts))
}

/// Submit a prompt for moderation
#[utoipa::path(
    post,
    path = "/prompts",
    request_body = CreatePromptDto,
    responses(
        (status = 201, description = "Prompt submitted, pending approval", body = Prompt),
        (status = 400, description = "Validation error", body = ErrorResponse)
    ),
    tag = "prompts"
)]
pub async fn submit_prompt(
    State(service): State<Arc<PromptService>>,
    AppJson(dto): AppJson<CreatePromptDto>,
) -> Result<(StatusCode, Json<Prompt>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let prompt = service.create(dto, Submission::Public).await?;
    Ok((StatusCode::CREATED, Json(prompt)))
}

/// Unique tags of approved prompts, sorted
#[utoipa::path(
    get,
    path = "/tags",
    responses(
        (status = 200, description = "Sorted unique tags", body = Vec<String>)
    ),
    tag = "prompts"
)]
pub async fn list_tags(State(service): State<Arc<PromptService>>) -> Result<Json<Vec<String>>> {
    let tags = service.approved_tags().await?;
    Ok(Json(tags))
}

/// List every prompt regardless of approval (admin only)
#[utoipa::path(
    get,
    path = "/admin/prompts",
    responses(
        (status = 200, description = "Newest 100 prompts", body = Vec<Prompt>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn admin_list_prompts(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<PromptService>>,
) -> Result<Json<Vec<Prompt>>> {
    let prompts = service.list_admin().await?;
    Ok(Json(prompts))
}

/// Create an approved prompt directly (admin only)
#[utoipa::path(
    post,
    path = "/admin/prompts",
    request_body = CreatePromptDto,
    responses(
        (status = 200, description = "Prompt created and approved", body = Prompt),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn admin_create_prompt(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<PromptService>>,
    AppJson(dto): AppJson<CreatePromptDto>,
) -> Result<Json<Prompt>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let prompt = service.create(dto, Submission::Admin).await?;
    info!("Admin '{}' created prompt {}", admin.username, prompt.id);
    Ok(Json(prompt))
}

/// Search all prompts where any requested tag matches (admin only)
#[utoipa::path(
    get,
    path = "/admin/prompts/search",
    params(PromptSearchParams),
    responses(
        (status = 200, description = "Matching prompts, unbounded", body = Vec<Prompt>),
        (status = 400, description = "Invalid query", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn admin_search_prompts(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<PromptService>>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Prompt>>> {
    let query = PromptListQuery::from_search_query(query.as_deref())?;
    let prompts = service.search_any(query).await?;
    Ok(Json(prompts))
}

/// Partially update a prompt (admin only)
#[utoipa::path(
    put,
    path = "/admin/prompts/{id}",
    params(
        ("id" = String, Path, description = "Prompt ID")
    ),
    request_body = UpdatePromptDto,
    responses(
        (status = 200, description = "Prompt after the update", body = Prompt),
        (status = 400, description = "Invalid ID or validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Prompt not found", body = ErrorResponse)
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_prompt(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<PromptService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdatePromptDto>,
) -> Result<Json<Prompt>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let prompt = service.update(&id, dto).await?;
    info!("Admin '{}' updated prompt {}", admin.username, prompt.id);
    Ok(Json(prompt))
}

/// Delete a prompt permanently (admin only)
#[utoipa::path(
    delete,
    path = "/admin/prompts/{id}",
    params(
        ("id" = String, Path, description = "Prompt ID")
    ),
    responses(
        (status = 200, description = "Prompt deleted", body = MessageResponse),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Prompt not found", body = ErrorResponse)
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_prompt(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<PromptService>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    service.delete(&id).await?;
    info!("Admin '{}' deleted prompt {}", admin.username, id);
    Ok(Json(MessageResponse::new("Prompt deleted")))
}

/// Unique tags across all prompts, unsorted (admin only)
#[utoipa::path(
    get,
    path = "/admin/tags",
    responses(
        (status = 200, description = "Unique tags of every prompt", body = Vec<String>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn admin_list_tags(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<PromptService>>,
) -> Result<Json<Vec<String>>> {
    let tags = service.all_tags().await?;
    Ok(Json(tags))
}
