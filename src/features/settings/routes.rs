use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::settings::handlers;
use crate::features::settings::services::SettingsService;

/// Public read route (the form needs the deadline)
pub fn public_routes(service: Arc<SettingsService>) -> Router {
    Router::new()
        .route("/api/settings", get(handlers::get_settings))
        .with_state(service)
}

/// Mutating route behind the bearer-auth gate
pub fn protected_routes(service: Arc<SettingsService>) -> Router {
    Router::new()
        .route("/api/settings", put(handlers::update_settings))
        .with_state(service)
}
