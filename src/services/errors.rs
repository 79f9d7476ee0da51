use thiserror::Error;

use crate::repository::errors::RepositoryError;
use crate::storage::StorageError;

/// Errors surfaced by the service layer to route handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request references a record that does not exist.
    #[error("not found")]
    NotFound,
    /// The submitted form failed validation.
    #[error("{0}")]
    Form(String),
    /// Credentials rejected at login.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Failure in the store adapter.
    #[error("repository error: {0}")]
    Repository(RepositoryError),
    /// Failure in the media store.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Convenience alias for fallible service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Validation(message) => ServiceError::Form(message),
            other => ServiceError::Repository(other),
        }
    }
}
