use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::exports::handlers;
use crate::features::exports::services::ExportService;

/// Admin report downloads, mounted behind the bearer-auth gate
pub fn protected_routes(service: Arc<ExportService>) -> Router {
    Router::new()
        .route("/api/reports/toppers", get(handlers::get_toppers_report))
        .with_state(service)
}
