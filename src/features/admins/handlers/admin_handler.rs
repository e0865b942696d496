use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::admins::dtos::{AdminResponseDto, CreateAdminDto, UpdateAdminDto};
use crate::features::admins::services::AdminService;
use crate::features::auth::guards::RequireSuperAdmin;
use crate::shared::types::ApiResponse;

/// List all admin accounts
#[utoipa::path(
    get,
    path = "/api/admins",
    responses(
        (status = 200, description = "List of admin accounts", body = ApiResponse<Vec<AdminResponseDto>>),
        (status = 403, description = "Super admin access required")
    ),
    tag = "admins",
    security(("bearer_auth" = []))
)]
pub async fn list_admins(
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<Vec<AdminResponseDto>>>> {
    let admins = service.list().await?;
    Ok(Json(ApiResponse::success(Some(admins), None, None)))
}

/// Create an admin account
#[utoipa::path(
    post,
    path = "/api/admins",
    request_body = CreateAdminDto,
    responses(
        (status = 201, description = "Admin created", body = ApiResponse<AdminResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    ),
    tag = "admins",
    security(("bearer_auth" = []))
)]
pub async fn create_admin(
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    State(service): State<Arc<AdminService>>,
    AppJson(dto): AppJson<CreateAdminDto>,
) -> Result<(StatusCode, Json<ApiResponse<AdminResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let admin = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(admin), None, None)),
    ))
}

/// Update an admin account
#[utoipa::path(
    put,
    path = "/api/admins/{id}",
    params(("id" = Uuid, Path, description = "Admin id")),
    request_body = UpdateAdminDto,
    responses(
        (status = 200, description = "Admin updated", body = ApiResponse<AdminResponseDto>),
        (status = 404, description = "Admin not found")
    ),
    tag = "admins",
    security(("bearer_auth" = []))
)]
pub async fn update_admin(
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateAdminDto>,
) -> Result<Json<ApiResponse<AdminResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let admin = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(admin), None, None)))
}

/// Deactivate an admin account
#[utoipa::path(
    delete,
    path = "/api/admins/{id}",
    params(("id" = Uuid, Path, description = "Admin id")),
    responses(
        (status = 200, description = "Admin deactivated"),
        (status = 404, description = "Admin not found")
    ),
    tag = "admins",
    security(("bearer_auth" = []))
)]
pub async fn deactivate_admin(
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.deactivate(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Admin deactivated".to_string()),
        None,
    )))
}
