use diesel::result::Error as DieselError;
use thiserror::Error;

/// Errors produced by the store adapter.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The operation required a record that does not exist. Point lookups
    /// report absence as `Ok(None)` instead of this variant.
    #[error("record not found")]
    NotFound,
    /// Write payload rejected before it reached the store.
    #[error("validation error: {0}")]
    Validation(String),
    /// Connection pool exhausted or unavailable.
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// Any other store failure, propagated unchanged.
    #[error("database error: {0}")]
    Database(DieselError),
}

/// Convenience alias for fallible store operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,
            other => RepositoryError::Database(other),
        }
    }
}
