use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::settings::dtos::{SettingsResponseDto, UpdateSettingsDto};
use crate::features::settings::services::SettingsService;
use crate::shared::types::ApiResponse;

/// Get application settings
///
/// Public: the submission form shows the deadline before accepting input.
#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "Current settings", body = ApiResponse<SettingsResponseDto>),
    ),
    tag = "settings"
)]
pub async fn get_settings(
    State(service): State<Arc<SettingsService>>,
) -> Result<Json<ApiResponse<SettingsResponseDto>>> {
    let settings = service.get().await?;
    Ok(Json(ApiResponse::success(Some(settings), None, None)))
}

/// Update application settings
#[utoipa::path(
    put,
    path = "/api/settings",
    request_body = UpdateSettingsDto,
    responses(
        (status = 200, description = "Settings updated", body = ApiResponse<SettingsResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "settings",
    security(("bearer_auth" = []))
)]
pub async fn update_settings(
    State(service): State<Arc<SettingsService>>,
    AppJson(dto): AppJson<UpdateSettingsDto>,
) -> Result<Json<ApiResponse<SettingsResponseDto>>> {
    let settings = service.update(dto).await?;
    Ok(Json(ApiResponse::success(Some(settings), None, None)))
}
