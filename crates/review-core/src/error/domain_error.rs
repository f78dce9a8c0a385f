//! Domain errors - error types for the domain layer
//!
//! Claim-mutation errors are raised strictly before any write, so a caller
//! receiving one can always assume nothing changed.

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Claim mutation errors
    // =========================================================================
    #[error("Application not found: {0}")]
    AppNotFound(Snowflake),

    #[error("Application already claimed by {owner}")]
    AlreadyClaimed { owner: Snowflake },

    #[error("Application is not claimed")]
    NotClaimed,

    #[error("Claim is held by {owner}, not the requesting reviewer")]
    NotOwner { owner: Snowflake },

    #[error("Invalid application status: {0}")]
    InvalidStatus(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for machine-readable responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::AppNotFound(_) => "APP_NOT_FOUND",
            Self::AlreadyClaimed { .. } => "ALREADY_CLAIMED",
            Self::NotClaimed => "NOT_CLAIMED",
            Self::NotOwner { .. } => "NOT_OWNER",
            Self::InvalidStatus(_) => "INVALID_STATUS",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Error for a claim mutation attempted while panic mode is active
    pub fn panic_mode() -> Self {
        Self::InvalidStatus("panic mode active".to_string())
    }

    /// Error for a claim mutation against a terminal application
    pub fn terminal_status(status: impl std::fmt::Display) -> Self {
        Self::InvalidStatus(format!("application is {status}"))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AppNotFound(_))
    }

    /// Check if this is an ownership/concurrency conflict
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::AlreadyClaimed { .. } | Self::NotClaimed | Self::NotOwner { .. }
        )
    }

    /// Check if this is a precondition failure on the application itself
    pub fn is_invalid_status(&self) -> bool {
        matches!(self, Self::InvalidStatus(_))
    }
}
