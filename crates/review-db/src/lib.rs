//! # review-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `review-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Repository implementations, including the atomic claim/unclaim
//!   transactions that pair the claim-row write with its audit entry
//!
//! ## Usage
//!
//! ```rust,ignore
//! use review_db::pool::{create_pool, DatabaseConfig};
//! use review_db::PgClaimRepository;
//! use review_core::traits::ClaimRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let claim_repo = PgClaimRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgActionLogRepository, PgApplicationRepository, PgClaimRepository, PgEpochRepository,
    PgMetricsRepository, PgPanicSwitch,
};

/// Embedded SQL migrations for the review schema
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
