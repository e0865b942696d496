use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::standards::dtos::{CreateStandardDto, StandardResponseDto, UpdateStandardDto};
use crate::features::standards::models::Standard;
use crate::shared::validation::STANDARD_CODE_REGEX;

const STANDARD_COLUMNS: &str =
    "id, name, code, display_order, is_college_level, is_active, created_at, updated_at";

/// Normalize a standard code for storage and uniqueness checks
fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Service for standard reference data
pub struct StandardService {
    pool: PgPool,
}

impl StandardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List standards ordered by display_order then name
    pub async fn list(&self, active_only: bool) -> Result<Vec<StandardResponseDto>> {
        let standards = sqlx::query_as::<_, Standard>(&format!(
            r#"
            SELECT {STANDARD_COLUMNS}
            FROM standards
            WHERE ($1 = FALSE OR is_active = TRUE)
            ORDER BY display_order, name
            "#
        ))
        .bind(active_only)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list standards: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(standards.into_iter().map(|s| s.into()).collect())
    }

    /// Get a standard by id
    pub async fn get(&self, id: Uuid) -> Result<StandardResponseDto> {
        Ok(self.find_by_id(id).await?.into())
    }

    /// Create a standard; the code is unique after uppercase normalization
    pub async fn create(&self, dto: CreateStandardDto) -> Result<StandardResponseDto> {
        let code = normalize_code(&dto.code);
        self.validate_code(&code)?;

        if self.code_exists(&code, None).await? {
            return Err(AppError::Conflict(format!(
                "Standard with code '{}' already exists",
                code
            )));
        }

        let standard = sqlx::query_as::<_, Standard>(&format!(
            r#"
            INSERT INTO standards (name, code, display_order, is_college_level)
            VALUES ($1, $2, $3, $4)
            RETURNING {STANDARD_COLUMNS}
            "#
        ))
        .bind(dto.name.trim())
        .bind(&code)
        .bind(dto.display_order)
        .bind(dto.is_college_level)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create standard: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Standard created: {} ({})", standard.name, standard.code);
        Ok(standard.into())
    }

    /// Partially update a standard; the uniqueness check excludes the row itself
    pub async fn update(&self, id: Uuid, dto: UpdateStandardDto) -> Result<StandardResponseDto> {
        let existing = self.find_by_id(id).await?;

        let code = match dto.code {
            Some(ref raw) => {
                let code = normalize_code(raw);
                self.validate_code(&code)?;
                if self.code_exists(&code, Some(id)).await? {
                    return Err(AppError::Conflict(format!(
                        "Standard with code '{}' already exists",
                        code
                    )));
                }
                code
            }
            None => existing.code,
        };

        let name = dto
            .name
            .map(|n| n.trim().to_string())
            .unwrap_or(existing.name);
        let display_order = dto.display_order.unwrap_or(existing.display_order);
        let is_college_level = dto.is_college_level.unwrap_or(existing.is_college_level);
        let is_active = dto.is_active.unwrap_or(existing.is_active);

        let standard = sqlx::query_as::<_, Standard>(&format!(
            r#"
            UPDATE standards
            SET name = $1, code = $2, display_order = $3, is_college_level = $4,
                is_active = $5, updated_at = NOW()
            WHERE id = $6
            RETURNING {STANDARD_COLUMNS}
            "#
        ))
        .bind(&name)
        .bind(&code)
        .bind(display_order)
        .bind(is_college_level)
        .bind(is_active)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update standard: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(standard.into())
    }

    /// Delete a standard.
    ///
    /// Refused while results still reference it, so a delete can never
    /// silently orphan submitted records.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let dependents = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM exam_results WHERE standard_id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if dependents > 0 {
            return Err(AppError::Conflict(format!(
                "Cannot delete standard: {} result(s) still reference it",
                dependents
            )));
        }

        let result = sqlx::query("DELETE FROM standards WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete standard: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Standard not found".to_string()));
        }

        Ok(())
    }

    fn validate_code(&self, code: &str) -> Result<()> {
        if !STANDARD_CODE_REGEX.is_match(code) {
            return Err(AppError::Validation(format!(
                "Invalid standard code '{}'",
                code
            )));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Standard> {
        sqlx::query_as::<_, Standard>(&format!(
            "SELECT {STANDARD_COLUMNS} FROM standards WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch standard: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Standard not found".to_string()))
    }

    async fn code_exists(&self, code: &str, exclude: Option<Uuid>) -> Result<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM standards WHERE code = $1 AND ($2::uuid IS NULL OR id <> $2)",
        )
        .bind(code)
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
    fn code_is_uppercased_and_trimmed() {
        assert_eq!(normalize_code("btech"), "BTECH");
        assert_eq!(normalize_code("  Std-10 "), "STD-10");
        // "BTech" and "btech" normalize identically, so the second insert conflicts
        assert_eq!(normalize_code("BTech"), normalize_code("btech"));
    }
}
