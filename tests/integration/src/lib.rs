//! Integration test utilities for the review engine
//!
//! This crate provides an in-memory backend implementing every repository
//! port, so the service layer can be exercised end to end without a
//! database. The backend's single lock is the serialization point the
//! Postgres implementation gets from its transactions.


pub use fixtures::*;
pub use helpers::*;
