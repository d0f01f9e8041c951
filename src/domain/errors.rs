//! Domain error types
//!
//! Framework-agnostic business-level failures. The API layer maps these
//! onto HTTP status codes: Validation/Conflict -> 400, NotFound -> 404,
//! Database -> 500.

use std::fmt;

#[derive(Debug)]
pub enum DomainError {
    /// Resource not found
    NotFound,
    /// Invalid or missing input field, with message
    Validation(String),
    /// Duplicate unique field or referential-integrity failure
    Conflict(String),
    /// Database/persistence error
    Database(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound => write!(f, "Resource not found"),
            DomainError::Validation(msg) => write!(f, "Validation error: {}", msg),
            DomainError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            DomainError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Constraint violations are client errors; everything else from the
// storage layer is a 500.
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                DomainError::Conflict("Duplicate value for a unique field".to_string())
            }
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(_)) => {
                DomainError::Conflict("Invalid foreign key reference".to_string())
            }
            _ => DomainError::Database(e.to_string()),
        }
    }
}
