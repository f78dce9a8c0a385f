//! Moderator metrics database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the moderator_metrics table (PK = moderator_id + guild_id)
#[derive(Debug, Clone, FromRow)]
pub struct ModeratorMetricsModel {
    pub moderator_id: i64,
    pub guild_id: i64,
    pub total_claims: i64,
    pub total_accepts: i64,
    pub total_rejects: i64,
    pub total_kicks: i64,
    pub total_modmail_opens: i64,
    pub avg_response_time_s: Option<f64>,
    pub p50_response_time_s: Option<i64>,
    pub p95_response_time_s: Option<i64>,
    pub updated_at: DateTime<Utc>,
}
