//! # review-service
//!
//! Application layer: claim concurrency, metrics aggregation, epoch
//! management, and the DTOs the command layer consumes.

pub mod dto;
pub mod services;

pub use services::{
    ClaimService, EpochService, MetricsService, RecalcReport, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, TopSort,
};
