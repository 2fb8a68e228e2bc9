//! Error model shared by the store, the repository and the migration engine.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Errors returned by every public storage operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A foreign-key or uniqueness rule would be broken.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    /// A schema migration step could not complete. The store must not be used.
    #[error("migration failed: {0}")]
    MigrationFailure(String),
    /// The referenced identifier does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// A draft was malformed and rejected before any storage I/O.
    #[error("validation error: {0}")]
    ValidationError(String),
    /// Any other database failure.
    #[error("database error: {0}")]
    Database(String),
    /// A connection could not be obtained from the pool.
    #[error("connection pool error: {0}")]
    Pool(String),
    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Convenient alias for results returned from storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<DieselError> for StoreError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::CheckViolation
                | DatabaseErrorKind::NotNullViolation => {
                    StoreError::ConstraintViolation(info.message().to_string())
                }
                _ => StoreError::Database(info.message().to_string()),
            },
            DieselError::NotFound => StoreError::NotFound("record not found".to_string()),
            other => StoreError::Database(other.to_string()),
        }
    }
}

impl From<diesel::r2d2::PoolError> for StoreError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        StoreError::Pool(err.to_string())
    }
}

impl From<config::ConfigError> for StoreError {
    fn from(err: config::ConfigError) -> Self {
        StoreError::Configuration(err.to_string())
    }
}
