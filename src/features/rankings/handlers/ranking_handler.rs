use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::rankings::dtos::{
    GroupCountDto, GroupQuery, RankingQuery, StandardGroupDto, SummaryDto,
};
use crate::features::rankings::services::RankingService;
use crate::shared::types::ApiResponse;

/// Top-N results per standard
///
/// `n` defaults to 3 (top three); award lists use `n=1` or `n=2`.
#[utoipa::path(
    get,
    path = "/api/rankings/toppers",
    params(RankingQuery),
    responses(
        (status = 200, description = "Ranked groups per standard", body = ApiResponse<Vec<StandardGroupDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "rankings",
    security(("bearer_auth" = []))
)]
pub async fn get_toppers(
    State(service): State<Arc<RankingService>>,
    Query(query): Query<RankingQuery>,
) -> Result<Json<ApiResponse<Vec<StandardGroupDto>>>> {
    let groups = service.toppers(query).await?;
    Ok(Json(ApiResponse::success(Some(groups), None, None)))
}

/// Summary statistics over the filtered result set
#[utoipa::path(
    get,
    path = "/api/rankings/summary",
    params(RankingQuery),
    responses(
        (status = 200, description = "Count and percentage statistics", body = ApiResponse<SummaryDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "rankings",
    security(("bearer_auth" = []))
)]
pub async fn get_summary(
    State(service): State<Arc<RankingService>>,
    Query(query): Query<RankingQuery>,
) -> Result<Json<ApiResponse<SummaryDto>>> {
    let summary = service.summary(query).await?;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}

/// Grouped counts by medium, village or standard
#[utoipa::path(
    get,
    path = "/api/rankings/groups",
    params(GroupQuery),
    responses(
        (status = 200, description = "Group keys with counts and ranked members", body = ApiResponse<Vec<GroupCountDto>>),
        (status = 400, description = "Unknown grouping axis"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "rankings",
    security(("bearer_auth" = []))
)]
pub async fn get_groups(
    State(service): State<Arc<RankingService>>,
    Query(query): Query<GroupQuery>,
) -> Result<Json<ApiResponse<Vec<GroupCountDto>>>> {
    let groups = service.groups(query.filters(), query.by).await?;
    Ok(Json(ApiResponse::success(Some(groups), None, None)))
}
