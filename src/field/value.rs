//! Native setting values
//!
//! A `SettingValue` is the typed result of coercing a raw JSON value
//! against a field descriptor. It is what constraint checks run on and
//! what the registry proxy stores.

use base64::Engine;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

/// A coerced, native setting value.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    /// UTF-8 string
    Str(String),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point
    Float(f64),
    /// Boolean
    Bool(bool),
    /// Timestamp, normalized to UTC
    Datetime(DateTime<Utc>),
    /// Homogeneous list
    List(Vec<SettingValue>),
    /// Nested object, keyed by field name
    Object(BTreeMap<String, SettingValue>),
    /// UUID reference to another object
    Reference(Uuid),
    /// Binary payload
    Bytes(Vec<u8>),
}

impl SettingValue {
    /// Returns the type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            SettingValue::Str(_) => "string",
            SettingValue::Int(_) => "int",
            SettingValue::Float(_) => "float",
            SettingValue::Bool(_) => "bool",
            SettingValue::Datetime(_) => "datetime",
            SettingValue::List(_) => "list",
            SettingValue::Object(_) => "object",
            SettingValue::Reference(_) => "reference",
            SettingValue::Bytes(_) => "bytes",
        }
    }

    /// Whether the value counts as empty for required-field checks.
    ///
    /// Numbers, booleans, datetimes and references are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            SettingValue::Str(s) => s.is_empty(),
            SettingValue::List(items) => items.is_empty(),
            SettingValue::Object(fields) => fields.is_empty(),
            SettingValue::Bytes(bytes) => bytes.is_empty(),
            _ => false,
        }
    }

    /// Length of the value for length-bound checks, where one applies.
    pub fn length(&self) -> Option<usize> {
        match self {
            SettingValue::Str(s) => Some(s.chars().count()),
            SettingValue::List(items) => Some(items.len()),
            SettingValue::Bytes(bytes) => Some(bytes.len()),
            _ => None,
        }
    }

    /// Projects the value back to JSON.
    ///
    /// Datetimes render as RFC 3339, references as UUID strings and
    /// binary payloads as base64.
    pub fn to_json(&self) -> Value {
        match self {
            SettingValue::Str(s) => Value::String(s.clone()),
            SettingValue::Int(n) => Value::from(*n),
            SettingValue::Float(x) => Value::from(*x),
            SettingValue::Bool(b) => Value::Bool(*b),
            SettingValue::Datetime(ts) => Value::String(ts.to_rfc3339()),
            SettingValue::List(items) => {
                Value::Array(items.iter().map(SettingValue::to_json).collect())
            }
            SettingValue::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(name, value)| (name.clone(), value.to_json()))
                    .collect(),
            ),
            SettingValue::Reference(id) => Value::String(id.to_string()),
            SettingValue::Bytes(bytes) => {
                Value::String(base64::engine::general_purpose::STANDARD.encode(bytes))
            }
        }
    }
}
