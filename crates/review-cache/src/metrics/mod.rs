//! Metrics cache store

mod metrics_cache;

pub use metrics_cache::{MetricsCache, DEFAULT_TTL};
