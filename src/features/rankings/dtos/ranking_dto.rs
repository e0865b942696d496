use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::results::models::{ExamResultDetail, Medium};

/// Filters shared by all ranking and report endpoints
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct RankingQuery {
    pub medium: Option<Medium>,
    pub standard_id: Option<Uuid>,
    pub village_id: Option<Uuid>,
    /// Inclusive lower bound on submission time
    pub submitted_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on submission time
    pub submitted_to: Option<DateTime<Utc>>,
    /// Rankings use approved results only unless this is set
    #[serde(default)]
    pub include_unapproved: bool,
    /// Entries per standard group (default 3)
    pub n: Option<usize>,
}

/// Grouping axis for `GET /api/rankings/groups`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Medium,
    Village,
    Standard,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct GroupQuery {
    pub by: GroupBy,

    pub medium: Option<Medium>,
    pub standard_id: Option<Uuid>,
    pub village_id: Option<Uuid>,
    pub submitted_from: Option<DateTime<Utc>>,
    pub submitted_to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub include_unapproved: bool,
}

impl GroupQuery {
    pub fn filters(&self) -> RankingQuery {
        RankingQuery {
            medium: self.medium,
            standard_id: self.standard_id,
            village_id: self.village_id,
            submitted_from: self.submitted_from,
            submitted_to: self.submitted_to,
            include_unapproved: self.include_unapproved,
            n: None,
        }
    }
}

/// One ranked entry within a group
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankedResultDto {
    pub rank: usize,
    pub id: Uuid,
    pub student_name: String,
    pub standard: String,
    pub medium: Medium,
    pub percentage: Decimal,
    pub village_name: String,
    pub contact_number: String,
}

impl RankedResultDto {
    pub fn from_detail(rank: usize, detail: &ExamResultDetail) -> Self {
        Self {
            rank,
            id: detail.id,
            student_name: detail.student_name.clone(),
            standard: detail.standard_label().to_string(),
            medium: detail.medium,
            percentage: detail.percentage,
            village_name: detail.village_name.clone(),
            contact_number: detail.contact_number.clone(),
        }
    }
}

/// Top-N entries for one standard (catalogued or free-text label)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StandardGroupDto {
    pub standard: String,
    pub members: Vec<RankedResultDto>,
}

/// Aggregate statistics over a filtered result set
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDto {
    pub count: usize,
    pub average_percentage: Decimal,
    pub max_percentage: Decimal,
    pub min_percentage: Decimal,
}

/// Count plus ranked members for one group key
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupCountDto {
    pub key: String,
    pub count: usize,
    pub members: Vec<RankedResultDto>,
}
