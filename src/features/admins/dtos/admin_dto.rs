use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::admins::models::{Admin, AdminRole};

/// Response DTO for an admin account (never exposes the password hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponseDto {
    pub id: Uuid,
    pub email: String,
    pub role: AdminRole,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Admin> for AdminResponseDto {
    fn from(a: Admin) -> Self {
        Self {
            id: a.id,
            email: a.email,
            role: a.role,
            is_active: a.is_active,
            last_login_at: a.last_login_at,
            created_at: a.created_at,
        }
    }
}

/// Request DTO for creating an admin account
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    pub role: AdminRole,
}

/// Request DTO for partially updating an admin account
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminDto {
    pub role: Option<AdminRole>,

    pub is_active: Option<bool>,

    /// When set, resets the account password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
}
