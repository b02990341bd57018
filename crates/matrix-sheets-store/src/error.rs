//! Store error types

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while reading or writing a store
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite error
    #[error("SQLite error: {0}")]
    Sql(rusqlite::Error),

    /// Referenced record does not exist
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    /// A unique key (username, slug) is already taken
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A thread panicked while holding the store lock
    #[error("Store lock poisoned")]
    Poisoned,

    /// A stored password digest could not be parsed
    #[error("Invalid password digest: {0}")]
    InvalidDigest(String),
}

impl StoreError {
    pub(crate) fn not_found(kind: &'static str, id: i64) -> Self {
        StoreError::NotFound { kind, id }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(e, msg)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                StoreError::Conflict(msg.unwrap_or_else(|| e.to_string()))
            }
            other => StoreError::Sql(other),
        }
    }
}
