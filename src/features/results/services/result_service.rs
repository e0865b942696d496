use std::sync::Arc;

use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::results::dtos::{
    ListResultsQuery, ResultResponseDto, SubmitResultDto, UpdateResultDto,
};
use crate::features::results::models::ExamResultDetail;
use crate::features::settings::SettingsService;
use crate::modules::storage::LocalStore;

/// An image part pulled out of the public multipart submission
#[derive(Debug)]
pub struct UploadedImage {
    pub data: Vec<u8>,
    pub content_type: String,
}

const DETAIL_SELECT: &str = r#"
    SELECT er.id, er.student_name, er.standard_id, er.other_standard, er.medium,
           er.total_marks, er.obtained_marks, er.percentage, er.village_id,
           er.contact_number, er.image_url, er.image_url_secondary,
           er.is_verified, er.is_approved, er.submitted_at, er.created_at,
           er.updated_at,
           s.name AS standard_name, s.display_order AS standard_display_order,
           v.name AS village_name
    FROM exam_results er
    LEFT JOIN standards s ON s.id = er.standard_id
    JOIN villages v ON v.id = er.village_id
"#;

pub struct ResultService {
    pool: PgPool,
    storage: Arc<LocalStore>,
    settings: Arc<SettingsService>,
}

impl ResultService {
    pub fn new(pool: PgPool, storage: Arc<LocalStore>, settings: Arc<SettingsService>) -> Self {
        Self {
            pool,
            storage,
            settings,
        }
    }

    /// Public submission: validate, store images, insert the record.
    ///
    /// New records always start unverified and unapproved; submissions
    /// after the configured deadline are rejected.
    pub async fn submit(
        &self,
        dto: SubmitResultDto,
        images: Vec<UploadedImage>,
    ) -> Result<ResultResponseDto> {
        if let Some(deadline) = self.settings.submission_deadline().await? {
            if Utc::now() > deadline {
                return Err(AppError::BadRequest(
                    "The submission window has closed".to_string(),
                ));
            }
        }

        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let other_standard = dto
            .other_standard
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        if dto.standard_id.is_some() == other_standard.is_some() {
            return Err(AppError::Validation(
                "Provide either a standard or an \"other standard\" label, not both".to_string(),
            ));
        }

        let medium = dto
            .medium
            .ok_or_else(|| AppError::Validation("Medium is required".to_string()))?;
        let village_id = dto
            .village_id
            .ok_or_else(|| AppError::Validation("Village is required".to_string()))?;

        if let Some(standard_id) = dto.standard_id {
            self.ensure_standard_exists(standard_id).await?;
        }
        self.ensure_village_exists(village_id).await?;

        let percentage = resolve_percentage(dto.total_marks, dto.obtained_marks, dto.percentage)?;

        if images.is_empty() || images.len() > 2 {
            return Err(AppError::Validation(
                "Attach one or two result images".to_string(),
            ));
        }

        let mut stored = Vec::with_capacity(images.len());
        for image in images {
            match self
                .storage
                .save("results", image.data, &image.content_type)
                .await
            {
                Ok(file) => stored.push(file),
                Err(e) => {
                    for file in &stored {
                        self.storage.delete_by_url(&file.url).await;
                    }
                    return Err(e);
                }
            }
        }
        let image_url = stored[0].url.clone();
        let image_url_secondary = stored.get(1).map(|f| f.url.clone());

        let inserted = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO exam_results (
                student_name, standard_id, other_standard, medium,
                total_marks, obtained_marks, percentage,
                village_id, contact_number, image_url, image_url_secondary
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(dto.student_name.trim())
        .bind(dto.standard_id)
        .bind(&other_standard)
        .bind(medium)
        .bind(dto.total_marks)
        .bind(dto.obtained_marks)
        .bind(percentage)
        .bind(village_id)
        .bind(&dto.contact_number)
        .bind(&image_url)
        .bind(&image_url_secondary)
        .fetch_one(&self.pool)
        .await;

        let id = match inserted {
            Ok(id) => id,
            Err(e) => {
                warn!("Result insert failed, removing stored images: {:?}", e);
                for file in &stored {
                    self.storage.delete_by_url(&file.url).await;
                }
                return Err(AppError::Database(e));
            }
        };

        info!("Result submitted: {} ({})", id, percentage);
        self.get(id).await
    }

    /// Admin list with optional AND-combined filters and pagination.
    ///
    /// A filter value that matches nothing yields an empty page.
    pub async fn list(&self, query: ListResultsQuery) -> Result<(Vec<ResultResponseDto>, i64)> {
        let filter_sql = r#"
            WHERE ($1::medium IS NULL OR er.medium = $1)
              AND ($2::uuid IS NULL OR er.standard_id = $2)
              AND ($3::uuid IS NULL OR er.village_id = $3)
              AND ($4::timestamptz IS NULL OR er.submitted_at >= $4)
              AND ($5::timestamptz IS NULL OR er.submitted_at <= $5)
              AND ($6::boolean IS NULL OR er.is_approved = $6)
              AND ($7::boolean IS NULL OR er.is_verified = $7)
              AND ($8::text IS NULL
                   OR er.student_name ILIKE '%' || $8 || '%'
                   OR er.contact_number ILIKE '%' || $8 || '%')
        "#;

        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM exam_results er {}",
            filter_sql
        ))
        .bind(query.medium)
        .bind(query.standard_id)
        .bind(query.village_id)
        .bind(query.submitted_from)
        .bind(query.submitted_to)
        .bind(query.approved)
        .bind(query.verified)
        .bind(&search)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, ExamResultDetail>(&format!(
            "{} {} ORDER BY er.submitted_at DESC, er.id LIMIT $9 OFFSET $10",
            DETAIL_SELECT, filter_sql
        ))
        .bind(query.medium)
        .bind(query.standard_id)
        .bind(query.village_id)
        .bind(query.submitted_from)
        .bind(query.submitted_to)
        .bind(query.approved)
        .bind(query.verified)
        .bind(&search)
        .bind(query.pagination().limit())
        .bind(query.pagination().offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, id: Uuid) -> Result<ResultResponseDto> {
        Ok(self.fetch_detail(id).await?.into())
    }

    /// Partial update; a marks change recomputes the stored percentage
    pub async fn update(&self, id: Uuid, dto: UpdateResultDto) -> Result<ResultResponseDto> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let existing = self.fetch_detail(id).await?;

        if dto.standard_id.is_some() && dto.other_standard.is_some() {
            return Err(AppError::Validation(
                "Provide either a standard or an \"other standard\" label, not both".to_string(),
            ));
        }

        let (standard_id, other_standard) = if let Some(standard_id) = dto.standard_id {
            self.ensure_standard_exists(standard_id).await?;
            (Some(standard_id), None)
        } else if let Some(label) = dto.other_standard.as_deref().map(str::trim) {
            if label.is_empty() {
                return Err(AppError::Validation(
                    "Other standard label cannot be empty".to_string(),
                ));
            }
            (None, Some(label.to_string()))
        } else {
            (existing.standard_id, existing.other_standard.clone())
        };

        let village_id = match dto.village_id {
            Some(village_id) => {
                self.ensure_village_exists(village_id).await?;
                village_id
            }
            None => existing.village_id,
        };

        let total_marks = dto.total_marks.or(existing.total_marks);
        let obtained_marks = dto.obtained_marks.or(existing.obtained_marks);
        let marks_changed = dto.total_marks.is_some() || dto.obtained_marks.is_some();

        let percentage = if marks_changed || dto.percentage.is_some() {
            resolve_percentage(total_marks, obtained_marks, dto.percentage)?
        } else {
            existing.percentage
        };

        let student_name = dto
            .student_name
            .as_deref()
            .map(str::trim)
            .map(str::to_string)
            .unwrap_or(existing.student_name);
        let medium = dto.medium.unwrap_or(existing.medium);
        let contact_number = dto.contact_number.unwrap_or(existing.contact_number);

        sqlx::query(
            r#"
            UPDATE exam_results
            SET student_name = $2, standard_id = $3, other_standard = $4,
                medium = $5, total_marks = $6, obtained_marks = $7,
                percentage = $8, village_id = $9, contact_number = $10,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&student_name)
        .bind(standard_id)
        .bind(&other_standard)
        .bind(medium)
        .bind(total_marks)
        .bind(obtained_marks)
        .bind(percentage)
        .bind(village_id)
        .bind(&contact_number)
        .execute(&self.pool)
        .await?;

        self.get(id).await
    }

    /// Flip the approval flag
    pub async fn toggle_approved(&self, id: Uuid) -> Result<ResultResponseDto> {
        self.toggle_flag(id, "is_approved").await
    }

    /// Flip the verification flag
    pub async fn toggle_verified(&self, id: Uuid) -> Result<ResultResponseDto> {
        self.toggle_flag(id, "is_verified").await
    }

    async fn toggle_flag(&self, id: Uuid, column: &str) -> Result<ResultResponseDto> {
        let result = sqlx::query(&format!(
            "UPDATE exam_results SET {column} = NOT {column}, updated_at = NOW() WHERE id = $1"
        ))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Result {} not found", id)));
        }
        self.get(id).await
    }

    /// Delete a result and its stored images (image removal is best-effort)
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let existing = self.fetch_detail(id).await?;

        sqlx::query("DELETE FROM exam_results WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.storage.delete_by_url(&existing.image_url).await;
        if let Some(url) = &existing.image_url_secondary {
            self.storage.delete_by_url(url).await;
        }

        info!("Result deleted: {}", id);
        Ok(())
    }

    async fn fetch_detail(&self, id: Uuid) -> Result<ExamResultDetail> {
        sqlx::query_as::<_, ExamResultDetail>(&format!("{} WHERE er.id = $1", DETAIL_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Result {} not found", id)))
    }

    async fn ensure_standard_exists(&self, id: Uuid) -> Result<()> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM standards WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        if !exists {
            return Err(AppError::Validation("Unknown standard".to_string()));
        }
        Ok(())
    }

    async fn ensure_village_exists(&self, id: Uuid) -> Result<()> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM villages WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        if !exists {
            return Err(AppError::Validation("Unknown village".to_string()));
        }
        Ok(())
    }
}

/// Compute the stored percentage.
///
/// When both marks are present the percentage is derived from them
/// (two decimals, half-up) and any supplied value is ignored; otherwise
/// the supplied value is required. The final value must land in [0, 100].
fn resolve_percentage(
    total_marks: Option<Decimal>,
    obtained_marks: Option<Decimal>,
    supplied: Option<Decimal>,
) -> Result<Decimal> {
    let hundred = Decimal::from(100);

    let percentage = match (total_marks, obtained_marks) {
        (Some(total), Some(obtained)) => {
            if total <= Decimal::ZERO {
                return Err(AppError::Validation(
                    "Total marks must be positive".to_string(),
                ));
            }
            if obtained < Decimal::ZERO {
                return Err(AppError::Validation(
                    "Obtained marks cannot be negative".to_string(),
                ));
            }
            if obtained > total {
                return Err(AppError::Validation(
                    "Obtained marks cannot exceed total marks".to_string(),
                ));
            }
            (obtained / total * hundred)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        }
        _ => supplied
            .ok_or_else(|| {
                AppError::Validation(
                    "Percentage is required when marks are not provided".to_string(),
                )
            })?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
    };

    if percentage < Decimal::ZERO || percentage > hundred {
        return Err(AppError::Validation(
            "Percentage must be between 0 and 100".to_string(),
        ));
    }

    Ok(percentage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn percentage_is_derived_from_marks() {
        let pct = resolve_percentage(Some(dec!(50)), Some(dec!(45)), None).unwrap();
        assert_eq!(pct, dec!(90.00));
    }

    #[test]
    fn derived_percentage_rounds_half_up_to_two_decimals() {
        // 41 / 60 * 100 = 68.333... -> 68.33
        let pct = resolve_percentage(Some(dec!(60)), Some(dec!(41)), None).unwrap();
        assert_eq!(pct, dec!(68.33));

        // 100 / 160 * 100 = 62.5 exactly, no rounding surprise
        let pct = resolve_percentage(Some(dec!(160)), Some(dec!(100)), None).unwrap();
        assert_eq!(pct, dec!(62.50));
    }

    #[test]
    fn marks_override_a_supplied_percentage() {
        let pct = resolve_percentage(Some(dec!(200)), Some(dec!(150)), Some(dec!(10))).unwrap();
        assert_eq!(pct, dec!(75.00));
    }

    #[test]
    fn supplied_percentage_used_when_marks_missing() {
        let pct = resolve_percentage(None, Some(dec!(45)), Some(dec!(88.5))).unwrap();
        assert_eq!(pct, dec!(88.50));
    }

    #[test]
    fn missing_percentage_and_marks_is_rejected() {
        assert!(resolve_percentage(None, None, None).is_err());
    }

    #[test]
    fn obtained_above_total_is_rejected() {
        assert!(resolve_percentage(Some(dec!(50)), Some(dec!(51)), None).is_err());
    }

    #[test]
    fn zero_total_is_rejected() {
        assert!(resolve_percentage(Some(dec!(0)), Some(dec!(0)), None).is_err());
    }

    #[test]
    fn out_of_range_supplied_percentage_is_rejected() {
        assert!(resolve_percentage(None, None, Some(dec!(100.01))).is_err());
        assert!(resolve_percentage(None, None, Some(dec!(-1))).is_err());
    }
}
