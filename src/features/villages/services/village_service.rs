use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::villages::dtos::{CreateVillageDto, UpdateVillageDto, VillageResponseDto};
use crate::features::villages::models::Village;

const VILLAGE_COLUMNS: &str = "id, name, is_active, created_at, updated_at";

/// Trim the submitted name; uniqueness compares the trimmed form
fn normalize_name(raw: &str) -> Result<String> {
    let name = raw.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Village name is required".to_string()));
    }
    Ok(name)
}

/// Service for village reference data
pub struct VillageService {
    pool: PgPool,
}

impl VillageService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List villages ordered by name
    pub async fn list(&self, active_only: bool) -> Result<Vec<VillageResponseDto>> {
        let villages = sqlx::query_as::<_, Village>(&format!(
            r#"
            SELECT {VILLAGE_COLUMNS}
            FROM villages
            WHERE ($1 = FALSE OR is_active = TRUE)
            ORDER BY name
            "#
        ))
        .bind(active_only)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list villages: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(villages.into_iter().map(|v| v.into()).collect())
    }

    /// Get a village by id
    pub async fn get(&self, id: Uuid) -> Result<VillageResponseDto> {
        Ok(self.find_by_id(id).await?.into())
    }

    /// Create a village; the name is unique after trimming
    pub async fn create(&self, dto: CreateVillageDto) -> Result<VillageResponseDto> {
        let name = normalize_name(&dto.name)?;

        if self.name_exists(&name, None).await? {
            return Err(AppError::Conflict(format!(
                "Village '{}' already exists",
                name
            )));
        }

        let village = sqlx::query_as::<_, Village>(&format!(
            r#"
            INSERT INTO villages (name)
            VALUES ($1)
            RETURNING {VILLAGE_COLUMNS}
            "#
        ))
        .bind(&name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create village: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Village created: {}", village.name);
        Ok(village.into())
    }

    /// Partially update a village; the uniqueness check excludes the row itself
    pub async fn update(&self, id: Uuid, dto: UpdateVillageDto) -> Result<VillageResponseDto> {
        let existing = self.find_by_id(id).await?;

        let name = match dto.name {
            Some(ref raw) => {
                let name = normalize_name(raw)?;
                if self.name_exists(&name, Some(id)).await? {
                    return Err(AppError::Conflict(format!(
                        "Village '{}' already exists",
                        name
                    )));
                }
                name
            }
            None => existing.name,
        };
        let is_active = dto.is_active.unwrap_or(existing.is_active);

        let village = sqlx::query_as::<_, Village>(&format!(
            r#"
            UPDATE villages
            SET name = $1, is_active = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING {VILLAGE_COLUMNS}
            "#
        ))
        .bind(&name)
        .bind(is_active)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update village: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(village.into())
    }

    /// Delete a village.
    ///
    /// Refused while results still reference it, so a delete can never
    /// silently orphan submitted records.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let dependents =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM exam_results WHERE village_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        if dependents > 0 {
            return Err(AppError::Conflict(format!(
                "Cannot delete village: {} result(s) still reference it",
                dependents
            )));
        }

        let result = sqlx::query("DELETE FROM villages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete village: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Village not found".to_string()));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Village> {
        sqlx::query_as::<_, Village>(&format!(
            "SELECT {VILLAGE_COLUMNS} FROM villages WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch village: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Village not found".to_string()))
    }

    async fn name_exists(&self, name: &str, exclude: Option<Uuid>) -> Result<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM villages WHERE name = $1 AND ($2::uuid IS NULL OR id <> $2)",
        )
        .bind(name)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed_before_uniqueness_comparison() {
        assert_eq!(normalize_name("  Amreli ").unwrap(), "Amreli");
        // " Amreli" and "Amreli" normalize identically, so the second insert conflicts
        assert_eq!(
            normalize_name(" Amreli").unwrap(),
            normalize_name("Amreli").unwrap()
        );
        assert!(matches!(normalize_name("   "), Err(AppError::Validation(_))));
    }
}
