use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::admins::models::Admin;
use crate::features::auth::dtos::{ChangePasswordDto, LoginRequestDto, LoginResponseDto};
use crate::features::auth::model::AuthenticatedAdmin;
use crate::features::auth::services::password;
use crate::features::auth::services::TokenService;

/// Message returned for every failed login, regardless of whether the
/// email exists, the password is wrong or the account is deactivated.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Reject deactivated accounts and wrong passwords with the same message
fn check_credentials(admin: &Admin, password: &str) -> Result<()> {
    if !admin.is_active {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    if !password::verify_password(password, &admin.password_hash)? {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    Ok(())
}

/// Service for admin login and password management
pub struct AuthService {
    pool: PgPool,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(pool: PgPool, tokens: Arc<TokenService>) -> Self {
        Self { pool, tokens }
    }

    /// Login with email and password, returning a bearer token
    pub async fn login(&self, dto: LoginRequestDto) -> Result<LoginResponseDto> {
        let email = dto.email.trim().to_lowercase();

        let admin = sqlx::query_as::<_, Admin>(
            r#"
            SELECT id, email, password_hash, role, is_active, last_login_at, created_at, updated_at
            FROM admins
            WHERE email = $1
            "#,
        )
        .bind(&email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up admin by email: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        check_credentials(&admin, &dto.password)?;

        sqlx::query("UPDATE admins SET last_login_at = NOW() WHERE id = $1")
            .bind(admin.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update last login: {:?}", e);
                AppError::Database(e)
            })?;

        let issued = self
            .tokens
            .issue_token(admin.id, &admin.email, admin.role.as_str())?;

        tracing::info!("Admin logged in: {}", admin.email);

        Ok(LoginResponseDto {
            access_token: issued.access_token,
            expires_in: issued.expires_in,
            admin: admin.into(),
        })
    }

    /// Fetch the profile of the authenticated admin
    pub async fn get_current_admin(
        &self,
        current: &AuthenticatedAdmin,
    ) -> Result<crate::features::admins::dtos::AdminResponseDto> {
        let admin = self.find_by_id(current.id).await?;
        Ok(admin.into())
    }

    /// Change the authenticated admin's password after verifying the old one
    pub async fn change_password(
        &self,
        current: &AuthenticatedAdmin,
        dto: ChangePasswordDto,
    ) -> Result<()> {
        let admin = self.find_by_id(current.id).await?;

        if !password::verify_password(&dto.current_password, &admin.password_hash)? {
            return Err(AppError::Unauthorized(
                "Current password is incorrect".to_string(),
            ));
        }

        let new_hash = password::hash_password(&dto.new_password)?;

        sqlx::query("UPDATE admins SET password_hash = $1, updated_at = NOW() WHERE id = $2")
            .bind(&new_hash)
            .bind(admin.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update password: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Password changed for admin: {}", admin.email);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Admin> {
        sqlx::query_as::<_, Admin>(
            r#"
            SELECT id, email, password_hash, role, is_active, last_login_at, created_at, updated_at
            FROM admins
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch admin: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Admin not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::admins::models::AdminRole;
    use chrono::Utc;

    fn admin_with_password(password: &str, is_active: bool) -> Admin {
        Admin {
            id: Uuid::new_v4(),
            email: "admin@example.org".to_string(),
            password_hash: password::hash_password(password).unwrap(),
            role: AdminRole::Staff,
            is_active,
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn unauthorized_message(result: Result<()>) -> String {
        match result {
            Err(AppError::Unauthorized(msg)) => msg,
            other => panic!("expected unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn correct_password_on_an_active_account_passes() {
        let admin = admin_with_password("s3cret-pass", true);
        assert!(check_credentials(&admin, "s3cret-pass").is_ok());
    }

    #[test]
    fn wrong_password_and_deactivated_account_share_one_message() {
        let admin = admin_with_password("s3cret-pass", true);
        let wrong = unauthorized_message(check_credentials(&admin, "guess"));

        let inactive = admin_with_password("s3cret-pass", false);
        let deactivated = unauthorized_message(check_credentials(&inactive, "s3cret-pass"));

        assert_eq!(wrong, "Invalid credentials");
        assert_eq!(wrong, deactivated);
    }
}
