use sqlx::PgPool;
use uuid::Uuid;

use crate::core::config::BootstrapAdminConfig;
use crate::core::error::{AppError, Result};
use crate::features::admins::dtos::{AdminResponseDto, CreateAdminDto, UpdateAdminDto};
use crate::features::admins::models::{Admin, AdminRole};
use crate::features::auth::services::password;

const ADMIN_COLUMNS: &str =
    "id, email, password_hash, role, is_active, last_login_at, created_at, updated_at";

/// Service for managing admin accounts
pub struct AdminService {
    pool: PgPool,
}

impl AdminService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a default super admin at startup when the table is empty.
    ///
    /// Does nothing when admins already exist or when no bootstrap
    /// credentials were configured.
    pub async fn bootstrap(&self, config: &BootstrapAdminConfig) -> Result<()> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if count > 0 {
            return Ok(());
        }

        let (Some(email), Some(pw)) = (&config.email, &config.password) else {
            tracing::warn!(
                "No admin accounts exist and no DEFAULT_ADMIN_EMAIL/DEFAULT_ADMIN_PASSWORD configured"
            );
            return Ok(());
        };

        let created = self
            .create(CreateAdminDto {
                email: email.clone(),
                password: pw.clone(),
                role: AdminRole::SuperAdmin,
            })
            .await?;

        tracing::info!("Bootstrap super admin created: {}", created.email);
        Ok(())
    }

    /// List all admin accounts
    pub async fn list(&self) -> Result<Vec<AdminResponseDto>> {
        let admins = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list admins: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(admins.into_iter().map(|a| a.into()).collect())
    }

    /// Create an admin account; emails are unique after lowercasing
    pub async fn create(&self, dto: CreateAdminDto) -> Result<AdminResponseDto> {
        let email = dto.email.trim().to_lowercase();

        if self.email_exists(&email, None).await? {
            return Err(AppError::Conflict(format!(
                "Admin with email '{}' already exists",
                email
            )));
        }

        let password_hash = password::hash_password(&dto.password)?;

        let admin = sqlx::query_as::<_, Admin>(&format!(
            r#"
            INSERT INTO admins (email, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING {ADMIN_COLUMNS}
            "#
        ))
        .bind(&email)
        .bind(&password_hash)
        .bind(dto.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create admin: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Admin created: {} ({})", admin.email, admin.role);
        Ok(admin.into())
    }

    /// Partially update an admin account (role, active flag, password reset)
    pub async fn update(&self, id: Uuid, dto: UpdateAdminDto) -> Result<AdminResponseDto> {
        let existing = self.find_by_id(id).await?;

        let role = dto.role.unwrap_or(existing.role);
        let is_active = dto.is_active.unwrap_or(existing.is_active);
        let password_hash = match dto.password {
            Some(pw) => password::hash_password(&pw)?,
            None => existing.password_hash,
        };

        let admin = sqlx::query_as::<_, Admin>(&format!(
            r#"
            UPDATE admins
            SET role = $1, is_active = $2, password_hash = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING {ADMIN_COLUMNS}
            "#
        ))
        .bind(role)
        .bind(is_active)
        .bind(&password_hash)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update admin: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(admin.into())
    }

    /// Deactivate an admin account (soft delete; logins are refused)
    pub async fn deactivate(&self, id: Uuid) -> Result<()> {
        let result =
            sqlx::query("UPDATE admins SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to deactivate admin: {:?}", e);
                    AppError::Database(e)
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Admin not found".to_string()));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Admin> {
        sqlx::query_as::<_, Admin>(&format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch admin: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound("Admin not found".to_string()))
    }

    async fn email_exists(&self, email: &str, exclude: Option<Uuid>) -> Result<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM admins WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2)",
        )
        .bind(email)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(count > 0)
    }
}
