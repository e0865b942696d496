use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::villages::dtos::{
    CreateVillageDto, ListVillagesQuery, UpdateVillageDto, VillageResponseDto,
};
use crate::features::villages::services::VillageService;
use crate::shared::types::ApiResponse;

/// List villages
///
/// Public; the submission form uses `active_only=true` to populate its picker.
#[utoipa::path(
    get,
    path = "/api/villages",
    params(ListVillagesQuery),
    responses(
        (status = 200, description = "List of villages", body = ApiResponse<Vec<VillageResponseDto>>),
    ),
    tag = "villages"
)]
pub async fn list_villages(
    State(service): State<Arc<VillageService>>,
    Query(query): Query<ListVillagesQuery>,
) -> Result<Json<ApiResponse<Vec<VillageResponseDto>>>> {
    let villages = service.list(query.active_only).await?;
    Ok(Json(ApiResponse::success(Some(villages), None, None)))
}

/// Get a village by id
#[utoipa::path(
    get,
    path = "/api/villages/{id}",
    params(("id" = Uuid, Path, description = "Village id")),
    responses(
        (status = 200, description = "Village found", body = ApiResponse<VillageResponseDto>),
        (status = 404, description = "Village not found")
    ),
    tag = "villages"
)]
pub async fn get_village(
    State(service): State<Arc<VillageService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VillageResponseDto>>> {
    let village = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(village), None, None)))
}

/// Create a village
#[utoipa::path(
    post,
    path = "/api/villages",
    request_body = CreateVillageDto,
    responses(
        (status = 201, description = "Village created", body = ApiResponse<VillageResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Duplicate name")
    ),
    tag = "villages",
    security(("bearer_auth" = []))
)]
pub async fn create_village(
    State(service): State<Arc<VillageService>>,
    AppJson(dto): AppJson<CreateVillageDto>,
) -> Result<(StatusCode, Json<ApiResponse<VillageResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let village = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(village), None, None)),
    ))
}

/// Update a village
#[utoipa::path(
    put,
    path = "/api/villages/{id}",
    params(("id" = Uuid, Path, description = "Village id")),
    request_body = UpdateVillageDto,
    responses(
        (status = 200, description = "Village updated", body = ApiResponse<VillageResponseDto>),
        (status = 404, description = "Village not found"),
        (status = 409, description = "Duplicate name")
    ),
    tag = "villages",
    security(("bearer_auth" = []))
)]
pub async fn update_village(
    State(service): State<Arc<VillageService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateVillageDto>,
) -> Result<Json<ApiResponse<VillageResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let village = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(village), None, None)))
}

/// Delete a village (refused while results reference it)
#[utoipa::path(
    delete,
    path = "/api/villages/{id}",
    params(("id" = Uuid, Path, description = "Village id")),
    responses(
        (status = 200, description = "Village deleted"),
        (status = 404, description = "Village not found"),
        (status = 409, description = "Results still reference this village")
    ),
    tag = "villages",
    security(("bearer_auth" = []))
)]
pub async fn delete_village(
    State(service): State<Arc<VillageService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Village deleted".to_string()),
        None,
    )))
}
