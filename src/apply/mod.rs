//! The apply engine for setreg
//!
//! One pass per request: walk every declared field of the schema, coerce
//! and validate what the payload carries, write accepted values through
//! the registry proxy, run cross-field rules, and either succeed silently
//! or fail with one ordered report of every problem found.
//!
//! # Design Principles
//!
//! - One bad field never stops the walk
//! - Expected failures are values; only collaborator failures propagate
//! - Errors keep field declaration order, schema-level errors last
//! - Commits happen per field during the walk and are not rolled back

mod errors;
mod report;
mod walker;

pub use errors::{ApplyError, ApplyResult};
pub use report::{ErrorKind, ErrorRecord, Report, ReportBuilder, ValidationError, MASKED_KIND};
pub use walker::{ApplyOptions, SchemaWalker};
