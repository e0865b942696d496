use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::features::results::handlers;
use crate::features::results::services::ResultService;

/// Public submission endpoint
pub fn public_routes(service: Arc<ResultService>, max_file_size: usize) -> Router {
    Router::new()
        .route(
            "/api/results",
            // Allow body size up to two image parts + buffer for text fields
            // and multipart overhead
            post(handlers::submit_result)
                .layer(DefaultBodyLimit::max(2 * max_file_size + 1024 * 1024)),
        )
        .with_state(service)
}

/// Admin review routes, mounted behind the bearer-auth gate
pub fn protected_routes(service: Arc<ResultService>) -> Router {
    Router::new()
        .route("/api/results", get(handlers::list_results))
        .route(
            "/api/results/{id}",
            get(handlers::get_result)
                .put(handlers::update_result)
                .delete(handlers::delete_result),
        )
        .route("/api/results/{id}/approve", patch(handlers::toggle_approved))
        .route("/api/results/{id}/verify", patch(handlers::toggle_verified))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use sqlx::postgres::PgPoolOptions;
    use std::collections::HashSet;

    use crate::core::config::UploadConfig;
    use crate::features::settings::SettingsService;
    use crate::modules::storage::LocalStore;

    const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

    fn service() -> Arc<ResultService> {
        // Lazy pool: never connected, the request fails at validation first
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        let storage = Arc::new(LocalStore::new(UploadConfig {
            dir: "/tmp/parinam-routes-test-uploads".to_string(),
            public_path: "/uploads".to_string(),
            max_file_size: MAX_FILE_SIZE,
            allowed_mime_types: HashSet::from(["image/jpeg".to_string()]),
        }));
        let settings = Arc::new(SettingsService::new(pool.clone()));
        Arc::new(ResultService::new(pool, storage, settings))
    }

    #[tokio::test]
    async fn body_limit_admits_an_image_larger_than_the_stock_cap() {
        let server = TestServer::new(public_routes(service(), MAX_FILE_SIZE)).unwrap();

        // A 3 MB part overflows axum's stock 2 MB body cap. With the raised
        // limit the multipart read must get past it and reach the bad
        // `medium` field that follows.
        let form = MultipartForm::new()
            .add_part(
                "image",
                Part::bytes(vec![0u8; 3 * 1024 * 1024])
                    .file_name("result.jpg")
                    .mime_type("image/jpeg"),
            )
            .add_text("medium", "hindi");

        let response = server.post("/api/results").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.text();
        assert!(
            body.contains("not a valid medium"),
            "expected the medium validation message, got: {}",
            body
        );
    }
}
