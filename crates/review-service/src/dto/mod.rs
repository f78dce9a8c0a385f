//! Data transfer objects for the command layer
//!
//! Response DTOs serialize domain entities for embeds and API output;
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

pub mod responses;

pub use responses::{ClaimResponse, ModeratorMetricsResponse, RecentActionResponse};
