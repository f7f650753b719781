//! Panel schema subsystem for setreg
//!
//! A panel schema is the ordered set of typed field definitions describing
//! one configuration object's shape.
//!
//! # Design Principles
//!
//! - Schemas are immutable for the duration of one request
//! - Field names are unique within a schema
//! - Field order in the schema is declaration order and drives walk order
//! - Schemas are loaded once at startup; malformed schema files fail startup

mod errors;
mod loader;
mod types;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult};
pub use loader::SchemaLoader;
pub use types::{FieldDescriptor, FieldKind, FieldType, Schema};
