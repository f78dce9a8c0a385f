//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in
//! review-core. Each repository handles database operations for a specific
//! domain entity; the claim repository additionally owns the paired
//! claim-plus-audit transactions.

mod action_log;
mod application;
mod claim;
mod epoch;
mod error;
mod metrics;
mod panic_switch;

pub use action_log::PgActionLogRepository;
pub use application::PgApplicationRepository;
pub use claim::PgClaimRepository;
pub use epoch::PgEpochRepository;
pub use metrics::PgMetricsRepository;
pub use panic_switch::PgPanicSwitch;
