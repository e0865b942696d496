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
use crate::features::standards::dtos::{
    CreateStandardDto, ListStandardsQuery, StandardResponseDto, UpdateStandardDto,
};
use crate::features::standards::services::StandardService;
use crate::shared::types::ApiResponse;

/// List standards
///
/// Public; the submission form uses `active_only=true` to populate its picker.
#[utoipa::path(
    get,
    path = "/api/standards",
    params(ListStandardsQuery),
    responses(
        (status = 200, description = "List of standards", body = ApiResponse<Vec<StandardResponseDto>>),
    ),
    tag = "standards"
)]
pub async fn list_standards(
    State(service): State<Arc<StandardService>>,
    Query(query): Query<ListStandardsQuery>,
) -> Result<Json<ApiResponse<Vec<StandardResponseDto>>>> {
    let standards = service.list(query.active_only).await?;
    Ok(Json(ApiResponse::success(Some(standards), None, None)))
}

/// Get a standard by id
#[utoipa::path(
    get,
    path = "/api/standards/{id}",
    params(("id" = Uuid, Path, description = "Standard id")),
    responses(
        (status = 200, description = "Standard found", body = ApiResponse<StandardResponseDto>),
        (status = 404, description = "Standard not found")
    ),
    tag = "standards"
)]
pub async fn get_standard(
    State(service): State<Arc<StandardService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<StandardResponseDto>>> {
    let standard = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(standard), None, None)))
}

/// Create a standard
#[utoipa::path(
    post,
    path = "/api/standards",
    request_body = CreateStandardDto,
    responses(
        (status = 201, description = "Standard created", body = ApiResponse<StandardResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Duplicate code")
    ),
    tag = "standards",
    security(("bearer_auth" = []))
)]
pub async fn create_standard(
    State(service): State<Arc<StandardService>>,
    AppJson(dto): AppJson<CreateStandardDto>,
) -> Result<(StatusCode, Json<ApiResponse<StandardResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let standard = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(standard), None, None)),
    ))
}

/// Update a standard
#[utoipa::path(
    put,
    path = "/api/standards/{id}",
    params(("id" = Uuid, Path, description = "Standard id")),
    request_body = UpdateStandardDto,
    responses(
        (status = 200, description = "Standard updated", body = ApiResponse<StandardResponseDto>),
        (status = 404, description = "Standard not found"),
        (status = 409, description = "Duplicate code")
    ),
    tag = "standards",
    security(("bearer_auth" = []))
)]
pub async fn update_standard(
    State(service): State<Arc<StandardService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateStandardDto>,
) -> Result<Json<ApiResponse<StandardResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let standard = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(standard), None, None)))
}

/// Delete a standard (refused while results reference it)
#[utoipa::path(
    delete,
    path = "/api/standards/{id}",
    params(("id" = Uuid, Path, description = "Standard id")),
    responses(
        (status = 200, description = "Standard deleted"),
        (status = 404, description = "Standard not found"),
        (status = 409, description = "Results still reference this standard")
    ),
    tag = "standards",
    security(("bearer_auth" = []))
)]
pub async fn delete_standard(
    State(service): State<Arc<StandardService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Standard deleted".to_string()),
        None,
    )))
}
