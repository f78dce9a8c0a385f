//! Database models with SQLx `FromRow` derives
//!
//! Models mirror table rows one to one; repository files map them onto the
//! domain entities from `review-core`.

mod action_log;
mod application;
mod claim;
mod epoch;
mod metrics;

pub use action_log::ActionLogModel;
pub use application::ApplicationModel;
pub use claim::ClaimModel;
pub use epoch::MetricsEpochModel;
pub use metrics::ModeratorMetricsModel;
