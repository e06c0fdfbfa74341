//! Application error type - every failure degrades to a user-visible notice.

use quill_core::error::{DomainError, RepoError};
use quill_core::ports::AuthError;
use quill_shared::Notice;

const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Application-level error returned by every view action.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid email or password")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The action does not fit the view's current state (e.g. a form is already open).
    #[error("Not allowed right now: {0}")]
    InvalidState(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// The transient notice shown to the user for this failure.
    pub fn notice(&self) -> Notice {
        match self {
            AppError::NotFound(detail)
            | AppError::Validation(detail)
            | AppError::Forbidden(detail)
            | AppError::Conflict(detail)
            | AppError::InvalidState(detail) => Notice::error(detail.clone()),
            AppError::Unauthorized => Notice::error(self.to_string()),
            AppError::Internal(detail) => {
                // Log internal errors; the user only sees a generic message
                tracing::error!("Internal error: {}", detail);
                Notice::error(GENERIC_FAILURE)
            }
        }
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::Duplicate(msg) => AppError::Conflict(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Domain(err) => err.into(),
            // Logged by `notice()`
            RepoError::Storage(msg) => AppError::Internal(format!("storage error: {msg}")),
            RepoError::Serialization(msg) => {
                AppError::Internal(format!("stored data is unreadable: {msg}"))
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => AppError::Unauthorized,
            AuthError::HashingError(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for view actions.
pub type AppResult<T> = Result<T, AppError>;
