//! Response DTOs
//!
//! Thin serialization views over the domain entities. Optional statistics
//! are omitted from the JSON rather than sent as null.

use chrono::{DateTime, Utc};
use serde::Serialize;

use review_core::entities::{ActionLogEntry, Claim, ModeratorMetrics};
use review_core::value_objects::Snowflake;

/// One claim, as shown in review embeds
#[derive(Debug, Clone, Serialize)]
pub struct ClaimResponse {
    pub app_id: Snowflake,
    pub reviewer_id: Snowflake,
    pub guild_id: Snowflake,
    pub claimed_at: DateTime<Utc>,
}

impl From<Claim> for ClaimResponse {
    fn from(claim: Claim) -> Self {
        Self {
            app_id: claim.app_id,
            reviewer_id: claim.reviewer_id,
            guild_id: claim.guild_id,
            claimed_at: claim.claimed_at,
        }
    }
}

/// One moderator's aggregated metrics row
#[derive(Debug, Clone, Serialize)]
pub struct ModeratorMetricsResponse {
    pub moderator_id: Snowflake,
    pub guild_id: Snowflake,
    pub total_claims: i64,
    pub total_accepts: i64,
    pub total_rejects: i64,
    pub total_kicks: i64,
    pub total_modmail_opens: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_response_time_s: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p50_response_time_s: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p95_response_time_s: Option<i64>,
    pub updated_at: DateTime<Utc>,
}

impl From<ModeratorMetrics> for ModeratorMetricsResponse {
    fn from(m: ModeratorMetrics) -> Self {
        Self {
            moderator_id: m.moderator_id,
            guild_id: m.guild_id,
            total_claims: m.total_claims,
            total_accepts: m.total_accepts,
            total_rejects: m.total_rejects,
            total_kicks: m.total_kicks,
            total_modmail_opens: m.total_modmail_opens,
            avg_response_time_s: m.avg_response_time_s,
            p50_response_time_s: m.p50_response_time_s,
            p95_response_time_s: m.p95_response_time_s,
            updated_at: m.updated_at,
        }
    }
}

/// One action-log entry, for the per-application history view
#[derive(Debug, Clone, Serialize)]
pub struct RecentActionResponse {
    pub id: i64,
    pub actor_id: Snowflake,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub created_at_s: i64,
}

impl From<ActionLogEntry> for RecentActionResponse {
    fn from(entry: ActionLogEntry) -> Self {
        Self {
            id: entry.id,
            actor_id: entry.actor_id,
            action: entry.action.as_str().to_string(),
            reason: entry.reason,
            created_at_s: entry.created_at_s,
        }
    }
}
