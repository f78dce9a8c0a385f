//! Business logic services
//!
//! This module contains the service layer implementations that handle
//! validation and orchestration of claim, metrics, and epoch operations.

pub mod claim;
pub mod context;
pub mod epoch;
pub mod error;
pub mod metrics;

// Re-export all services for convenience
pub use claim::ClaimService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use epoch::EpochService;
pub use error::{ServiceError, ServiceResult};
pub use metrics::{MetricsService, RecalcReport, TopSort};
