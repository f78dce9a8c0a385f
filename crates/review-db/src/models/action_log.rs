//! Action log database model

use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// Database model for the append-only action_log table
#[derive(Debug, Clone, FromRow)]
pub struct ActionLogModel {
    pub id: i64,
    pub guild_id: i64,
    pub app_id: Option<i64>,
    pub actor_id: i64,
    pub subject_id: i64,
    /// Action kind stored as string, see `ActionKind`
    pub action: String,
    pub reason: Option<String>,
    /// Optional structured blob (command context, attachments, ...)
    pub meta: Option<JsonValue>,
    /// Unix seconds
    pub created_at_s: i64,
}
