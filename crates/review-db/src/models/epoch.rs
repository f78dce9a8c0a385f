//! Metrics epoch database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the metrics_epochs table (one row per guild)
#[derive(Debug, Clone, FromRow)]
pub struct MetricsEpochModel {
    pub guild_id: i64,
    pub start_at: Option<DateTime<Utc>>,
}
