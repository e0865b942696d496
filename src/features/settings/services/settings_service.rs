use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::settings::dtos::{SettingsResponseDto, UpdateSettingsDto};
use crate::features::settings::models::AppSettings;

/// Repository-style access to the single settings row.
///
/// The row is created lazily with defaults on first read, so no seed
/// migration or ambient singleton is needed.
pub struct SettingsService {
    pool: PgPool,
}

impl SettingsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the settings row, creating it with defaults when missing
    pub async fn get(&self) -> Result<SettingsResponseDto> {
        Ok(self.fetch_or_create().await?.into())
    }

    /// Update the submission deadline
    pub async fn update(&self, dto: UpdateSettingsDto) -> Result<SettingsResponseDto> {
        // Ensure the row exists before updating it
        self.fetch_or_create().await?;

        let settings = sqlx::query_as::<_, AppSettings>(
            r#"
            UPDATE app_settings
            SET last_submission_date = $1, updated_at = NOW()
            WHERE id = 1
            RETURNING id, last_submission_date, updated_at
            "#,
        )
        .bind(dto.last_submission_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update settings: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Submission deadline updated: {:?}",
            settings.last_submission_date
        );
        Ok(settings.into())
    }

    /// The current submission deadline, if one is configured
    pub async fn submission_deadline(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.fetch_or_create().await?.last_submission_date)
    }

    async fn fetch_or_create(&self) -> Result<AppSettings> {
        sqlx::query_as::<_, AppSettings>(
            r#"
            INSERT INTO app_settings (id)
            VALUES (1)
            ON CONFLICT (id) DO UPDATE SET id = app_settings.id
            RETURNING id, last_submission_date, updated_at
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch settings: {:?}", e);
            AppError::Database(e)
        })
    }
}
