//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business rule failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Storage backend failed: {0}")]
    Storage(String),

    #[error("Stored collection is unreadable: {0}")]
    Serialization(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<crate::ports::StoreError> for RepoError {
    fn from(err: crate::ports::StoreError) -> Self {
        RepoError::Storage(err.to_string())
    }
}
