use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::settings::models::AppSettings;

/// Response DTO for application settings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponseDto {
    /// Deadline for public result submissions; null means submissions stay open
    pub last_submission_date: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl From<AppSettings> for SettingsResponseDto {
    fn from(s: AppSettings) -> Self {
        Self {
            last_submission_date: s.last_submission_date,
            updated_at: s.updated_at,
        }
    }
}

/// Request DTO for updating application settings
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsDto {
    /// New submission deadline; explicit null clears the deadline
    pub last_submission_date: Option<DateTime<Utc>>,
}
