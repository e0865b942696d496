use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::rankings::dtos::{RankingQuery, StandardGroupDto};
use crate::features::results::models::Medium;

/// Requested download format; omitted means the JSON view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Pdf,
    Docx,
    Xlsx,
}

impl ReportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "application/pdf",
            ReportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ReportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Docx => "docx",
            ReportFormat::Xlsx => "xlsx",
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ReportQuery {
    pub format: Option<ReportFormat>,

    pub medium: Option<Medium>,
    pub standard_id: Option<Uuid>,
    pub village_id: Option<Uuid>,
    pub submitted_from: Option<DateTime<Utc>>,
    pub submitted_to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub include_unapproved: bool,
    /// Entries per standard group (default 3)
    pub n: Option<usize>,
}

impl ReportQuery {
    pub fn filters(&self) -> RankingQuery {
        RankingQuery {
            medium: self.medium,
            standard_id: self.standard_id,
            village_id: self.village_id,
            submitted_from: self.submitted_from,
            submitted_to: self.submitted_to,
            include_unapproved: self.include_unapproved,
            n: self.n,
        }
    }
}

/// One line of a rendered report table
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub rank: usize,
    pub student_name: String,
    pub percentage: Decimal,
    pub village_name: String,
    pub contact_number: String,
}

/// One per-standard table in the report
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportGroup {
    pub standard: String,
    pub rows: Vec<ReportRow>,
}

/// The document handed to each renderer
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    pub title: String,
    pub groups: Vec<ReportGroup>,
}

impl ReportDocument {
    pub fn from_groups(title: String, groups: Vec<StandardGroupDto>) -> Self {
        let groups = groups
            .into_iter()
            .map(|group| ReportGroup {
                standard: group.standard,
                rows: group
                    .members
                    .into_iter()
                    .map(|member| ReportRow {
                        rank: member.rank,
                        student_name: member.student_name,
                        percentage: member.percentage,
                        village_name: member.village_name,
                        contact_number: member.contact_number,
                    })
                    .collect(),
            })
            .collect();

        Self { title, groups }
    }
}
