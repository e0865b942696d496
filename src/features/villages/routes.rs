use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::villages::handlers;
use crate::features::villages::services::VillageService;

/// Public read routes (submission form needs the village picker)
pub fn public_routes(service: Arc<VillageService>) -> Router {
    Router::new()
        .route("/api/villages", get(handlers::list_villages))
        .route("/api/villages/{id}", get(handlers::get_village))
        .with_state(service)
}

/// Mutating routes, mounted behind the bearer-auth gate
pub fn protected_routes(service: Arc<VillageService>) -> Router {
    Router::new()
        .route("/api/villages", post(handlers::create_village))
        .route(
            "/api/villages/{id}",
            put(handlers::update_village).delete(handlers::delete_village),
        )
        .with_state(service)
}
