//! Schema subsystem errors
//!
//! Error codes:
//! - UNKNOWN_SCHEMA (reject)
//! - SCHEMA_ALREADY_REGISTERED (reject)
//! - MALFORMED_SCHEMA (fatal at startup)

use thiserror::Error;

/// Errors raised while loading or registering panel schemas.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Schema identifier not present in the registry
    #[error("schema '{0}' not found")]
    UnknownSchema(String),

    /// A schema with this identifier is already registered
    #[error("schema '{0}' is already registered")]
    AlreadyRegistered(String),

    /// Schema file unreadable or structurally invalid
    #[error("malformed schema '{path}': {reason}")]
    Malformed {
        /// File path or `<in-memory>` for programmatic registration
        path: String,
        /// What made the schema unusable
        reason: String,
    },
}

/// Stable machine-readable codes for schema errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    UnknownSchema,
    AlreadyRegistered,
    Malformed,
}

impl SchemaErrorCode {
    /// Returns the string code.
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::UnknownSchema => "UNKNOWN_SCHEMA",
            SchemaErrorCode::AlreadyRegistered => "SCHEMA_ALREADY_REGISTERED",
            SchemaErrorCode::Malformed => "MALFORMED_SCHEMA",
        }
    }
}

impl SchemaError {
    /// Returns the machine-readable code for this error.
    pub fn code(&self) -> SchemaErrorCode {
        match self {
            SchemaError::UnknownSchema(_) => SchemaErrorCode::UnknownSchema,
            SchemaError::AlreadyRegistered(_) => SchemaErrorCode::AlreadyRegistered,
            SchemaError::Malformed { .. } => SchemaErrorCode::Malformed,
        }
    }
}

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;
