//! Application entity
//!
//! Applications are owned by the intake pipeline; this core reads them to
//! validate claim mutations and never writes them.

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// A membership application under review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: Snowflake,
    pub guild_id: Snowflake,
    /// The applicant
    pub user_id: Snowflake,
    pub status: ApplicationStatus,
}

impl Application {
    /// Whether claim/unclaim mutations are still allowed
    pub fn is_open(&self) -> bool {
        !self.status.is_terminal()
    }
}

/// Application lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    NeedsInfo,
    Approved,
    Rejected,
    Kicked,
}

impl ApplicationStatus {
    /// Terminal statuses permit no further claim mutation
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected | Self::Kicked)
    }

    /// Database representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::NeedsInfo => "needs_info",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Kicked => "kicked",
        }
    }

    /// Parse the database representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "submitted" => Some(Self::Submitted),
            "needs_info" => Some(Self::NeedsInfo),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "kicked" => Some(Self::Kicked),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
