use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::standards::models::Standard;

/// Query params for listing standards
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListStandardsQuery {
    /// When true (the public default), only active standards are returned
    #[serde(default)]
    pub active_only: bool,
}

/// Response DTO for a standard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StandardResponseDto {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub display_order: i32,
    pub is_college_level: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Standard> for StandardResponseDto {
    fn from(s: Standard) -> Self {
        Self {
            id: s.id,
            name: s.name,
            code: s.code,
            display_order: s.display_order,
            is_college_level: s.is_college_level,
            is_active: s.is_active,
            created_at: s.created_at,
        }
    }
}

/// Request DTO for creating a standard
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStandardDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Normalized to uppercase before storage
    #[validate(length(min = 1, max = 20, message = "Code must be 1-20 characters"))]
    pub code: String,

    #[serde(default)]
    pub display_order: i32,

    #[serde(default)]
    pub is_college_level: bool,
}

/// Request DTO for partially updating a standard
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStandardDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 20, message = "Code must be 1-20 characters"))]
    pub code: Option<String>,

    pub display_order: Option<i32>,

    pub is_college_level: Option<bool>,

    pub is_active: Option<bool>,
}
