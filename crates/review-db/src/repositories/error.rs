//! Error handling utilities for repositories

use review_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Whether an sqlx error is a unique constraint violation
pub fn is_unique_violation(e: &SqlxError) -> bool {
    e.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

/// Error for a persisted enum value this core does not recognize
pub fn unknown_enum_value(column: &str, value: &str) -> DomainError {
    DomainError::InternalError(format!("unknown {column} value in database: {value}"))
}
