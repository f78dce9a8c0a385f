//! Moderator performance metrics entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Aggregated performance metrics for one moderator in one guild.
///
/// Rows are regenerated wholesale by each recalculation; no field is ever
/// incrementally patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeratorMetrics {
    pub moderator_id: Snowflake,
    pub guild_id: Snowflake,
    pub total_claims: i64,
    pub total_accepts: i64,
    pub total_rejects: i64,
    pub total_kicks: i64,
    pub total_modmail_opens: i64,
    /// Seconds; None when the moderator has no qualifying samples
    pub avg_response_time_s: Option<f64>,
    pub p50_response_time_s: Option<i64>,
    pub p95_response_time_s: Option<i64>,
    pub updated_at: DateTime<Utc>,
}

impl ModeratorMetrics {
    /// A zeroed row for a moderator, before aggregation fills it in
    pub fn empty(moderator_id: Snowflake, guild_id: Snowflake) -> Self {
        Self {
            moderator_id,
            guild_id,
            total_claims: 0,
            total_accepts: 0,
            total_rejects: 0,
            total_kicks: 0,
            total_modmail_opens: 0,
            avg_response_time_s: None,
            p50_response_time_s: None,
            p95_response_time_s: None,
            updated_at: Utc::now(),
        }
    }

    /// Whether any response-time data was derived for this moderator
    pub fn has_response_times(&self) -> bool {
        self.avg_response_time_s.is_some()
    }
}

/// Per-guild "metrics start" timestamp.
///
/// Absence (or a None `start_at`) means the full action-log history is
/// visible to aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsEpoch {
    pub guild_id: Snowflake,
    pub start_at: Option<DateTime<Utc>>,
}

impl MetricsEpoch {
    /// Epoch lower bound in unix seconds, if one is active
    pub fn bound_s(&self) -> Option<i64> {
        self.start_at.map(|t| t.timestamp())
    }
}
