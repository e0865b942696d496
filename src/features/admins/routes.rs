use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::admins::handlers;
use crate::features::admins::services::AdminService;

/// Admin account management routes (super admin only, enforced per handler)
pub fn routes(service: Arc<AdminService>) -> Router {
    Router::new()
        .route(
            "/api/admins",
            get(handlers::list_admins).post(handlers::create_admin),
        )
        .route(
            "/api/admins/{id}",
            put(handlers::update_admin).delete(handlers::deactivate_admin),
        )
        .with_state(service)
}
