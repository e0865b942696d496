use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// The single settings row (id is always 1)
#[derive(Debug, Clone, FromRow)]
pub struct AppSettings {
    pub id: i32,
    /// Deadline for public result submissions; None means submissions stay open
    pub last_submission_date: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}
