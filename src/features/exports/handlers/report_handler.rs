use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::core::error::Result;
use crate::features::exports::dtos::{ReportDocument, ReportQuery};
use crate::features::exports::services::ExportService;
use crate::shared::types::ApiResponse;

/// Download the toppers report
///
/// With `format=pdf|docx|xlsx` the report is streamed back as an
/// attachment; without `format` the JSON view is returned.
#[utoipa::path(
    get,
    path = "/api/reports/toppers",
    params(ReportQuery),
    responses(
        (status = 200, description = "Report document (JSON view or file attachment)", body = ApiResponse<ReportDocument>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Report rendering failed")
    ),
    tag = "reports",
    security(("bearer_auth" = []))
)]
pub async fn get_toppers_report(
    State(service): State<Arc<ExportService>>,
    Query(query): Query<ReportQuery>,
) -> Result<Response> {
    let report = service.toppers_report(query.filters()).await?;

    let Some(format) = query.format else {
        return Ok(Json(ApiResponse::success(Some(report), None, None)).into_response());
    };

    let bytes = service.render(&report, format)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        service.attachment_filename(format)
    );

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
