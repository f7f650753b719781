//! setreg - A strict, schema-driven settings deserialization and validation engine
//!
//! Converts untrusted JSON payloads into validated, typed setting values for
//! one panel schema, collects every failure into a single ordered report,
//! and writes accepted values through a prefix-bound registry proxy.

pub mod apply;
pub mod field;
pub mod i18n;
pub mod observability;
pub mod registry;
pub mod rules;
pub mod schema;
