//! Apply engine errors
//!
//! `ValidationFailed` is the one expected failure: the aggregated report
//! of everything wrong with the payload, raised only after the full walk.
//! Every other variant is a collaborator failure and aborts the request
//! where it happens.

use thiserror::Error;

use super::report::Report;
use crate::registry::StoreError;

/// Errors raised by `SchemaWalker::apply`.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// The payload failed validation; carries the full report
    #[error("settings payload rejected with {} error(s)", .0.len())]
    ValidationFailed(Report),

    /// The request body was not a JSON object
    #[error("settings payload must be a JSON object, got {0}")]
    PayloadShape(&'static str),

    /// A declared field type has no registered handler
    #[error("no handler registered for field type '{0}'")]
    UnsupportedType(&'static str),

    /// The settings store failed a write
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for apply operations.
pub type ApplyResult<T> = Result<T, ApplyError>;
