//! Claim entity - a reviewer's exclusive lock on an application

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// An exclusive, reviewer-held lock on an application pending a decision.
///
/// At most one claim exists per application (enforced by the claims table
/// primary key). A claim is deliberately not released when the application
/// reaches a terminal status; the review card keeps showing who worked it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub app_id: Snowflake,
    pub reviewer_id: Snowflake,
    pub guild_id: Snowflake,
    pub claimed_at: DateTime<Utc>,
}

impl Claim {
    /// Whether the given user holds this claim
    pub fn is_held_by(&self, user_id: Snowflake) -> bool {
        self.reviewer_id == user_id
    }
}
