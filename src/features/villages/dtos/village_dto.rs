use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::villages::models::Village;

/// Query params for listing villages
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListVillagesQuery {
    /// When true (the public default), only active villages are returned
    #[serde(default)]
    pub active_only: bool,
}

/// Response DTO for a village
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VillageResponseDto {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Village> for VillageResponseDto {
    fn from(v: Village) -> Self {
        Self {
            id: v.id,
            name: v.name,
            is_active: v.is_active,
            created_at: v.created_at,
        }
    }
}

/// Request DTO for creating a village
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVillageDto {
    /// Trimmed before storage and uniqueness comparison
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
}

/// Request DTO for partially updating a village
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVillageDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    pub is_active: Option<bool>,
}
