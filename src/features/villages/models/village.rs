use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a village
#[derive(Debug, Clone, FromRow)]
pub struct Village {
    pub id: Uuid,
    /// Unique name, stored trimmed
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
