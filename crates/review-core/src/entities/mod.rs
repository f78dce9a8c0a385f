//! Domain entities - core business objects

mod action;
mod application;
mod claim;
mod metrics;

pub use action::{ActionKind, ActionLogEntry, NewActionLogEntry};
pub use application::{Application, ApplicationStatus};
pub use claim::Claim;
pub use metrics::{MetricsEpoch, ModeratorMetrics};
