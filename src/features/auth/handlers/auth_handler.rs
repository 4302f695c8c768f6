use crate::core::error::Result;
use crate::core::extractor::AppForm;
use crate::features::auth::dtos::{LoginRequestDto, TokenResponseDto};
use crate::features::auth::services::TokenService;
use axum::{extract::State, Json};
use std::sync::Arc;

/// Exchange the admin username and password for a bearer token
#[utoipa::path(
    post,
    path = "/token",
    request_body(
        content = LoginRequestDto,
        content_type = "application/x-www-form-urlencoded",
    ),
    responses(
        (status = 200, description = "Login successful", body = TokenResponseDto),
        (status = 400, description = "Incorrect username or password")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<TokenService>>,
    AppForm(dto): AppForm<LoginRequestDto>,
) -> Result<Json<TokenResponseDto>> {
    let token = service.login(&dto)?;
    Ok(Json(token))
}
