//! Field coercion and constraint subsystem for setreg
//!
//! One handler per declared field type converts a raw JSON value into the
//! field's native semantic type and checks the field's constraints.
//!
//! # Design Principles
//!
//! - Coercion is pure; it never touches storage
//! - Constraint violations are return values, not faults
//! - New field types register a handler without modifying the walker
//! - Handlers are selected through a tag map built at startup

mod errors;
mod handler;
mod handlers;
mod value;

pub(crate) use errors::json_type_name;
pub use errors::{CoercionError, ConstraintViolation, ReasonCode};
pub use handler::{FieldContext, FieldHandler, HandlerRegistry};
pub use value::SettingValue;
