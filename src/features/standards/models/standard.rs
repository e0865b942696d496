use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a standard (grade level or degree program)
#[derive(Debug, Clone, FromRow)]
pub struct Standard {
    pub id: Uuid,
    pub name: String,
    /// Unique code, stored uppercase (e.g. "STD10", "BTECH")
    pub code: String,
    pub display_order: i32,
    pub is_college_level: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
