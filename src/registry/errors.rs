//! Settings store errors
//!
//! Store failures are never validation outcomes: a failed write aborts
//! the whole request and propagates to the caller unchanged.

use thiserror::Error;

/// Errors raised by a settings store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record exists for the key
    #[error("no record for key '{0}'")]
    UnknownKey(String),

    /// The backing store refused or failed the operation
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
