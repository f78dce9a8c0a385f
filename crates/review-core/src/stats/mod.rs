//! Pure statistics used by the metrics aggregator
//!
//! Kept in the domain layer so the math is testable without a database.

mod percentile;
mod response_time;

pub use percentile::{mean, nearest_rank};
pub use response_time::{response_time_samples, summarize, ResponseTimeStats, MAX_RESPONSE_TIME_S};
