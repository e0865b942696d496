use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::results::dtos::{
    ListResultsQuery, ResultResponseDto, SubmitResultDto, UpdateResultDto,
};
use crate::features::results::models::Medium;
use crate::features::results::services::{ResultService, UploadedImage};
use crate::shared::types::{ApiResponse, Meta};

/// Submit an exam result
///
/// Public multipart endpoint used by the submission form. Text fields:
/// `studentName`, `standardId` or `otherStandard`, `medium`, `totalMarks`,
/// `obtainedMarks`, `percentage`, `villageId`, `contactNumber`. File parts
/// named `image` carry one or two result images.
#[utoipa::path(
    post,
    path = "/api/results",
    tag = "results",
    request_body(
        content = SubmitResultDto,
        content_type = "multipart/form-data",
        description = "Result fields plus one or two `image` file parts",
    ),
    responses(
        (status = 201, description = "Result submitted", body = ApiResponse<ResultResponseDto>),
        (status = 400, description = "Validation error or submissions closed"),
    )
)]
pub async fn submit_result(
    State(service): State<Arc<ResultService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ResultResponseDto>>)> {
    let mut dto = SubmitResultDto::default();
    let mut images: Vec<UploadedImage> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "image" | "images" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read image bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read image data: {}", e))
                })?;
                images.push(UploadedImage {
                    data: data.to_vec(),
                    content_type,
                });
            }
            "studentName" => dto.student_name = read_text(field).await?,
            "standardId" => dto.standard_id = Some(parse_uuid(&read_text(field).await?)?),
            "otherStandard" => {
                let text = read_text(field).await?;
                if !text.trim().is_empty() {
                    dto.other_standard = Some(text);
                }
            }
            "medium" => dto.medium = Some(parse_medium(&read_text(field).await?)?),
            "totalMarks" => dto.total_marks = Some(parse_decimal(&read_text(field).await?)?),
            "obtainedMarks" => dto.obtained_marks = Some(parse_decimal(&read_text(field).await?)?),
            "percentage" => dto.percentage = Some(parse_decimal(&read_text(field).await?)?),
            "villageId" => dto.village_id = Some(parse_uuid(&read_text(field).await?)?),
            "contactNumber" => dto.contact_number = read_text(field).await?,
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let result = service.submit(dto, images).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(result),
            Some("Result submitted successfully".to_string()),
            None,
        )),
    ))
}

/// List results
///
/// Admin view with optional filters; unknown filter ids yield an empty page.
#[utoipa::path(
    get,
    path = "/api/results",
    params(ListResultsQuery),
    responses(
        (status = 200, description = "Paginated results", body = ApiResponse<Vec<ResultResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "results",
    security(("bearer_auth" = []))
)]
pub async fn list_results(
    State(service): State<Arc<ResultService>>,
    Query(query): Query<ListResultsQuery>,
) -> Result<Json<ApiResponse<Vec<ResultResponseDto>>>> {
    let (results, total) = service.list(query).await?;
    Ok(Json(ApiResponse::success(
        Some(results),
        None,
        Some(Meta { total }),
    )))
}

/// Get a result by id
#[utoipa::path(
    get,
    path = "/api/results/{id}",
    params(("id" = Uuid, Path, description = "Result id")),
    responses(
        (status = 200, description = "Result found", body = ApiResponse<ResultResponseDto>),
        (status = 404, description = "Result not found")
    ),
    tag = "results",
    security(("bearer_auth" = []))
)]
pub async fn get_result(
    State(service): State<Arc<ResultService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ResultResponseDto>>> {
    let result = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(result), None, None)))
}

/// Update a result
///
/// Partial update; changing marks recomputes the stored percentage.
#[utoipa::path(
    put,
    path = "/api/results/{id}",
    params(("id" = Uuid, Path, description = "Result id")),
    request_body = UpdateResultDto,
    responses(
        (status = 200, description = "Result updated", body = ApiResponse<ResultResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Result not found")
    ),
    tag = "results",
    security(("bearer_auth" = []))
)]
pub async fn update_result(
    State(service): State<Arc<ResultService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateResultDto>,
) -> Result<Json<ApiResponse<ResultResponseDto>>> {
    let result = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(result),
        Some("Result updated successfully".to_string()),
        None,
    )))
}

/// Toggle approval on a result
#[utoipa::path(
    patch,
    path = "/api/results/{id}/approve",
    params(("id" = Uuid, Path, description = "Result id")),
    responses(
        (status = 200, description = "Approval flag flipped", body = ApiResponse<ResultResponseDto>),
        (status = 404, description = "Result not found")
    ),
    tag = "results",
    security(("bearer_auth" = []))
)]
pub async fn toggle_approved(
    State(service): State<Arc<ResultService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ResultResponseDto>>> {
    let result = service.toggle_approved(id).await?;
    Ok(Json(ApiResponse::success(Some(result), None, None)))
}

/// Toggle verification on a result
#[utoipa::path(
    patch,
    path = "/api/results/{id}/verify",
    params(("id" = Uuid, Path, description = "Result id")),
    responses(
        (status = 200, description = "Verification flag flipped", body = ApiResponse<ResultResponseDto>),
        (status = 404, description = "Result not found")
    ),
    tag = "results",
    security(("bearer_auth" = []))
)]
pub async fn toggle_verified(
    State(service): State<Arc<ResultService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ResultResponseDto>>> {
    let result = service.toggle_verified(id).await?;
    Ok(Json(ApiResponse::success(Some(result), None, None)))
}

/// Delete a result and its stored images
#[utoipa::path(
    delete,
    path = "/api/results/{id}",
    params(("id" = Uuid, Path, description = "Result id")),
    responses(
        (status = 200, description = "Result deleted"),
        (status = 404, description = "Result not found")
    ),
    tag = "results",
    security(("bearer_auth" = []))
)]
pub async fn delete_result(
    State(service): State<Arc<ResultService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Result deleted successfully".to_string()),
        None,
    )))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    let name = field.name().unwrap_or("").to_string();
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read field '{}': {}", name, e)))
}

fn parse_uuid(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|_| AppError::Validation(format!("'{}' is not a valid id", value)))
}

fn parse_decimal(value: &str) -> Result<Decimal> {
    value
        .trim()
        .parse::<Decimal>()
        .map_err(|_| AppError::Validation(format!("'{}' is not a valid number", value)))
}

fn parse_medium(value: &str) -> Result<Medium> {
    match value.trim().to_lowercase().as_str() {
        "gujarati" => Ok(Medium::Gujarati),
        "english" => Ok(Medium::English),
        other => Err(AppError::Validation(format!(
            "'{}' is not a valid medium (expected 'gujarati' or 'english')",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medium_parsing_is_case_insensitive() {
        assert_eq!(parse_medium("Gujarati").unwrap(), Medium::Gujarati);
        assert_eq!(parse_medium(" ENGLISH ").unwrap(), Medium::English);
        assert!(parse_medium("hindi").is_err());
    }

    #[test]
    fn decimal_parsing_rejects_garbage() {
        assert!(parse_decimal("45.5").is_ok());
        assert!(parse_decimal("forty five").is_err());
    }
}
