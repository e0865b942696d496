use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::rankings::handlers;
use crate::features::rankings::services::RankingService;

/// Admin ranking views, mounted behind the bearer-auth gate
pub fn protected_routes(service: Arc<RankingService>) -> Router {
    Router::new()
        .route("/api/rankings/toppers", get(handlers::get_toppers))
        .route("/api/rankings/summary", get(handlers::get_summary))
        .route("/api/rankings/groups", get(handlers::get_groups))
        .with_state(service)
}
