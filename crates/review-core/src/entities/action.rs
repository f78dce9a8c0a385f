//! Action log entities
//!
//! The action log is the append-only audit trail of every reviewer and
//! applicant action, and the sole input to the metrics aggregator. Rows are
//! never updated or deleted by this core.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::value_objects::Snowflake;

/// Action taxonomy persisted to the action log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Claim,
    Unclaim,
    Approve,
    Reject,
    PermReject,
    Kick,
    ModmailOpen,
    ModmailClose,
    /// Applicant action; only used as the time origin for response times
    AppSubmitted,
}

impl ActionKind {
    /// Database representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Claim => "claim",
            Self::Unclaim => "unclaim",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::PermReject => "perm_reject",
            Self::Kick => "kick",
            Self::ModmailOpen => "modmail_open",
            Self::ModmailClose => "modmail_close",
            Self::AppSubmitted => "app_submitted",
        }
    }

    /// Parse the database representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "claim" => Some(Self::Claim),
            "unclaim" => Some(Self::Unclaim),
            "approve" => Some(Self::Approve),
            "reject" => Some(Self::Reject),
            "perm_reject" => Some(Self::PermReject),
            "kick" => Some(Self::Kick),
            "modmail_open" => Some(Self::ModmailOpen),
            "modmail_close" => Some(Self::ModmailClose),
            "app_submitted" => Some(Self::AppSubmitted),
            _ => None,
        }
    }

    /// Whether this action is performed by a moderator (vs the applicant)
    pub fn is_moderator_action(&self) -> bool {
        !matches!(self, Self::AppSubmitted)
    }

    /// The fixed set of actions that qualify a moderator for metrics
    /// enumeration and response-time attribution. `unclaim` is audited but
    /// deliberately excluded: releasing a case is not work on it.
    pub const MODERATOR_ACTIONS: [ActionKind; 7] = [
        Self::Claim,
        Self::Approve,
        Self::Reject,
        Self::PermReject,
        Self::Kick,
        Self::ModmailOpen,
        Self::ModmailClose,
    ];
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted action log row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    pub id: i64,
    pub guild_id: Snowflake,
    pub app_id: Option<Snowflake>,
    /// Who performed the action (reviewer, or applicant for `app_submitted`)
    pub actor_id: Snowflake,
    /// Who the action was performed on
    pub subject_id: Snowflake,
    pub action: ActionKind,
    pub reason: Option<String>,
    pub meta: Option<JsonValue>,
    /// Unix seconds
    pub created_at_s: i64,
}

/// A new entry about to be appended (id and timestamp assigned by the store)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewActionLogEntry {
    pub guild_id: Snowflake,
    pub app_id: Option<Snowflake>,
    pub actor_id: Snowflake,
    pub subject_id: Snowflake,
    pub action: ActionKind,
    pub reason: Option<String>,
    pub meta: Option<JsonValue>,
}

impl NewActionLogEntry {
    /// Entry for a moderator action against an application
    pub fn moderation(
        guild_id: Snowflake,
        app_id: Snowflake,
        actor_id: Snowflake,
        subject_id: Snowflake,
        action: ActionKind,
    ) -> Self {
        Self {
            guild_id,
            app_id: Some(app_id),
            actor_id,
            subject_id,
            action,
            reason: None,
            meta: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_meta(mut self, meta: JsonValue) -> Self {
        self.meta = Some(meta);
        self
    }
}
