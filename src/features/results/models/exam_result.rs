use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Medium of instruction, mirrors the `medium` PG enum
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "medium", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Medium {
    Gujarati,
    English,
}

impl Medium {
    pub fn as_str(&self) -> &'static str {
        match self {
            Medium::Gujarati => "gujarati",
            Medium::English => "english",
        }
    }
}

impl std::fmt::Display for Medium {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exam result row joined with its standard and village names.
///
/// `standard_name` is NULL for free-text "other standard" submissions;
/// exactly one of `standard_name` / `other_standard` is set (DB check).
#[derive(Debug, Clone, FromRow)]
pub struct ExamResultDetail {
    pub id: Uuid,
    pub student_name: String,
    pub standard_id: Option<Uuid>,
    pub other_standard: Option<String>,
    pub medium: Medium,
    pub total_marks: Option<Decimal>,
    pub obtained_marks: Option<Decimal>,
    pub percentage: Decimal,
    pub village_id: Uuid,
    pub contact_number: String,
    pub image_url: String,
    pub image_url_secondary: Option<String>,
    pub is_verified: bool,
    pub is_approved: bool,
    pub submitted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub standard_name: Option<String>,
    pub standard_display_order: Option<i32>,
    pub village_name: String,
}

impl ExamResultDetail {
    /// Display label for the standard: the catalogued name, or the
    /// free-text label the submitter typed.
    pub fn standard_label(&self) -> &str {
        self.standard_name
            .as_deref()
            .or(self.other_standard.as_deref())
            .unwrap_or("")
    }
}
