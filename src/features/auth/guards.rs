//! Role-based authorization guards.
//!
//! Role hierarchy:
//! - super_admin: manages admin accounts, plus everything staff can do
//! - staff: reviews, edits, approves and exports submitted results

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedAdmin;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for super-admin-only routes (admin account management).
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireSuperAdmin(admin): RequireSuperAdmin) { ... }
/// ```
pub struct RequireSuperAdmin(pub AuthenticatedAdmin);

impl<S> FromRequestParts<S> for RequireSuperAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let admin = parts
            .extensions
            .get::<AuthenticatedAdmin>()
            .ok_or_else(|| AppError::Unauthorized("Admin not authenticated".to_string()))?;

        if !admin.is_super_admin() {
            return Err(AppError::Forbidden(
                "Super admin access required".to_string(),
            ));
        }

        Ok(RequireSuperAdmin(admin.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_staff_admin, create_super_admin};
    use axum::http::Request;

    fn parts_with(admin: AuthenticatedAdmin) -> Parts {
        let (mut parts, _) = Request::new(()).into_parts();
        parts.extensions.insert(admin);
        parts
    }

    #[tokio::test]
    async fn super_admin_passes_the_guard() {
        let mut parts = parts_with(create_super_admin());
        let guard = RequireSuperAdmin::from_request_parts(&mut parts, &()).await;
        assert!(guard.is_ok());
    }

    #[tokio::test]
    async fn staff_is_forbidden() {
        let mut parts = parts_with(create_staff_admin());
        let result = RequireSuperAdmin::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn unauthenticated_request_is_rejected() {
        let (mut parts, _) = Request::new(()).into_parts();
        let result = RequireSuperAdmin::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
