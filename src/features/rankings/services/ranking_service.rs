use sqlx::PgPool;

use crate::core::error::Result;
use crate::features::rankings::dtos::{
    GroupBy, GroupCountDto, RankingQuery, StandardGroupDto, SummaryDto,
};
use crate::features::rankings::services::aggregation;
use crate::features::results::models::ExamResultDetail;
use crate::shared::constants::TOP_THREE;

pub struct RankingService {
    pool: PgPool,
}

impl RankingService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Top-N per standard over the filtered (approved by default) set
    pub async fn toppers(&self, query: RankingQuery) -> Result<Vec<StandardGroupDto>> {
        let n = query.n.unwrap_or(TOP_THREE).max(1);
        let rows = self.fetch_filtered(&query).await?;
        Ok(aggregation::top_n_by_standard(rows, n))
    }

    /// Count / average / max / min over the filtered set
    pub async fn summary(&self, query: RankingQuery) -> Result<SummaryDto> {
        let rows = self.fetch_filtered(&query).await?;
        Ok(aggregation::summarize(&rows))
    }

    /// Grouped counts with ranked members
    pub async fn groups(&self, query: RankingQuery, by: GroupBy) -> Result<Vec<GroupCountDto>> {
        let rows = self.fetch_filtered(&query).await?;
        Ok(aggregation::grouped_counts(rows, by))
    }

    async fn fetch_filtered(&self, query: &RankingQuery) -> Result<Vec<ExamResultDetail>> {
        let rows = sqlx::query_as::<_, ExamResultDetail>(
            r#"
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
            WHERE ($1::boolean OR er.is_approved = TRUE)
              AND ($2::medium IS NULL OR er.medium = $2)
              AND ($3::uuid IS NULL OR er.standard_id = $3)
              AND ($4::uuid IS NULL OR er.village_id = $4)
              AND ($5::timestamptz IS NULL OR er.submitted_at >= $5)
              AND ($6::timestamptz IS NULL OR er.submitted_at <= $6)
            "#,
        )
        .bind(query.include_unapproved)
        .bind(query.medium)
        .bind(query.standard_id)
        .bind(query.village_id)
        .bind(query.submitted_from)
        .bind(query.submitted_to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
