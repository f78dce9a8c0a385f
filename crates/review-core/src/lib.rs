//! # review-core
//!
//! Domain layer for the application-review core: entities, value objects,
//! repository traits, the claim error taxonomy, and the pure statistics
//! used by the metrics aggregator.
//! This crate has zero dependencies on infrastructure (database, runtime, etc.).

pub mod entities;
pub mod error;
pub mod stats;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    ActionKind, ActionLogEntry, Application, ApplicationStatus, Claim, MetricsEpoch,
    ModeratorMetrics, NewActionLogEntry,
};
pub use error::DomainError;
pub use traits::{
    ActionLogRepository, ApplicationRepository, ClaimRepository, EpochRepository,
    MetricsRepository, PanicSwitch, RepoResult,
};
pub use value_objects::{Snowflake, SnowflakeParseError};
