use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::standards::handlers;
use crate::features::standards::services::StandardService;

/// Public read routes (submission form needs the standard picker)
pub fn public_routes(service: Arc<StandardService>) -> Router {
    Router::new()
        .route("/api/standards", get(handlers::list_standards))
        .route("/api/standards/{id}", get(handlers::get_standard))
        .with_state(service)
}

/// Mutating routes, mounted behind the bearer-auth gate
pub fn protected_routes(service: Arc<StandardService>) -> Router {
    Router::new()
        .route("/api/standards", post(handlers::create_standard))
        .route(
            "/api/standards/{id}",
            put(handlers::update_standard).delete(handlers::delete_standard),
        )
        .with_state(service)
}
