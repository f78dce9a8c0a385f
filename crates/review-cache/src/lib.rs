//! # review-cache
//!
//! Process-scoped, TTL-bounded cache in front of the moderator metrics
//! store. Built as an explicit collaborator: constructed once at startup
//! and shared by reference, never a module-level singleton, so tests can
//! inject their own TTL.
//!
//! ## Example
//!
//! ```ignore
//! use review_cache::MetricsCache;
//! use std::time::Duration;
//!
//! let cache = MetricsCache::new(Duration::from_secs(300));
//!
//! if let Some(rows) = cache.get_fresh(guild_id) {
//!     return rows; // younger than the TTL, no database access
//! }
//! // ... recompute, then:
//! cache.insert(guild_id, rows.clone());
//! ```

pub mod metrics;

pub use metrics::{MetricsCache, DEFAULT_TTL};
