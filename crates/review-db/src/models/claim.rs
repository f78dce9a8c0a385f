//! Claim database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the claims table (PK = app_id)
#[derive(Debug, Clone, FromRow)]
pub struct ClaimModel {
    pub app_id: i64,
    pub reviewer_id: i64,
    pub guild_id: i64,
    pub claimed_at: DateTime<Utc>,
}
