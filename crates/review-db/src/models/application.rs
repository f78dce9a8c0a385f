//! Application database model (read-only in this core)

use sqlx::FromRow;

/// Database model for the applications table
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationModel {
    pub id: i64,
    pub guild_id: i64,
    pub user_id: i64,
    /// Lifecycle status stored as string, see `ApplicationStatus`
    pub status: String,
}
