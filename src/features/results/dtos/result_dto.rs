use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::results::models::{ExamResultDetail, Medium};
use crate::shared::types::PaginationQuery;
use crate::shared::validation::CONTACT_NUMBER_REGEX;

/// Text fields of the public multipart submission.
///
/// Images arrive as separate multipart parts and are handled by the
/// handler; everything else is collected into this DTO and validated
/// as a unit.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResultDto {
    #[validate(length(min = 1, max = 150, message = "Student name must be 1-150 characters"))]
    pub student_name: String,

    /// Reference to a catalogued standard; mutually exclusive with `other_standard`
    pub other_standard: Option<String>,
    pub standard_id: Option<Uuid>,

    pub medium: Option<Medium>,

    pub total_marks: Option<Decimal>,
    pub obtained_marks: Option<Decimal>,

    /// Used only when marks are not both present
    pub percentage: Option<Decimal>,

    pub village_id: Option<Uuid>,

    #[validate(regex(
        path = *CONTACT_NUMBER_REGEX,
        message = "Contact number must be exactly 10 digits"
    ))]
    pub contact_number: String,
}

/// Admin-side partial update; absent fields keep their stored values
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResultDto {
    #[validate(length(min = 1, max = 150, message = "Student name must be 1-150 characters"))]
    pub student_name: Option<String>,
    pub standard_id: Option<Uuid>,
    pub other_standard: Option<String>,
    pub medium: Option<Medium>,
    pub total_marks: Option<Decimal>,
    pub obtained_marks: Option<Decimal>,
    pub percentage: Option<Decimal>,
    pub village_id: Option<Uuid>,
    #[validate(regex(
        path = *CONTACT_NUMBER_REGEX,
        message = "Contact number must be exactly 10 digits"
    ))]
    pub contact_number: Option<String>,
}

/// Filters for the admin result list; all optional, AND-combined
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListResultsQuery {
    pub medium: Option<Medium>,
    pub standard_id: Option<Uuid>,
    pub village_id: Option<Uuid>,
    /// Inclusive lower bound on submission time
    pub submitted_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on submission time
    pub submitted_to: Option<DateTime<Utc>>,
    pub approved: Option<bool>,
    pub verified: Option<bool>,
    /// Case-insensitive substring match over student name and contact number
    pub search: Option<String>,

    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Number of items per page (default: 10, max: 100)
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    crate::shared::constants::DEFAULT_PAGE_SIZE
}

impl ListResultsQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Response DTO for an exam result
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultResponseDto {
    pub id: Uuid,
    pub student_name: String,
    pub standard_id: Option<Uuid>,
    pub standard_name: Option<String>,
    pub other_standard: Option<String>,
    pub medium: Medium,
    pub total_marks: Option<Decimal>,
    pub obtained_marks: Option<Decimal>,
    pub percentage: Decimal,
    pub village_id: Uuid,
    pub village_name: String,
    pub contact_number: String,
    pub image_url: String,
    pub image_url_secondary: Option<String>,
    pub is_verified: bool,
    pub is_approved: bool,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ExamResultDetail> for ResultResponseDto {
    fn from(r: ExamResultDetail) -> Self {
        Self {
            id: r.id,
            student_name: r.student_name,
            standard_id: r.standard_id,
            standard_name: r.standard_name,
            other_standard: r.other_standard,
            medium: r.medium,
            total_marks: r.total_marks,
            obtained_marks: r.obtained_marks,
            percentage: r.percentage,
            village_id: r.village_id,
            village_name: r.village_name,
            contact_number: r.contact_number,
            image_url: r.image_url,
            image_url_secondary: r.image_url_secondary,
            is_verified: r.is_verified,
            is_approved: r.is_approved,
            submitted_at: r.submitted_at,
            updated_at: r.updated_at,
        }
    }
}
