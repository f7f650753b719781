//! Field-level failure types
//!
//! Both kinds are expected outcomes of processing untrusted input. They are
//! carried as values so the walk can record them and continue; neither is
//! ever raised as a fault.

use serde_json::Value;
use thiserror::Error;

/// Raw value shape does not match the declared field type.
#[derive(Debug, Clone, Error)]
#[error("cannot read {raw} as {expected}: {reason}")]
pub struct CoercionError {
    /// The raw JSON value as received
    pub raw: Value,
    /// The declared type name
    pub expected: &'static str,
    /// What went wrong
    pub reason: String,
}

impl CoercionError {
    /// The raw value's JSON type does not match at all.
    pub fn shape_mismatch(raw: &Value, expected: &'static str) -> Self {
        Self {
            raw: raw.clone(),
            expected,
            reason: format!("got {}", json_type_name(raw)),
        }
    }

    /// The raw value has the right JSON type but unusable content.
    pub fn malformed(raw: &Value, expected: &'static str, reason: impl Into<String>) -> Self {
        Self {
            raw: raw.clone(),
            expected,
            reason: reason.into(),
        }
    }
}

/// Machine-readable reasons for constraint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonCode {
    /// Required field received an empty value
    RequiredEmpty,
    /// Numeric value outside declared bounds
    OutOfRange,
    /// Value not in the allowed vocabulary
    NotAllowed,
    /// Value shorter than the declared minimum length
    TooShort,
    /// Value longer than the declared maximum length
    TooLong,
}

impl ReasonCode {
    /// Returns the string code.
    pub fn code(&self) -> &'static str {
        match self {
            ReasonCode::RequiredEmpty => "REQUIRED_EMPTY",
            ReasonCode::OutOfRange => "OUT_OF_RANGE",
            ReasonCode::NotAllowed => "NOT_ALLOWED",
            ReasonCode::TooShort => "TOO_SHORT",
            ReasonCode::TooLong => "TOO_LONG",
        }
    }
}

/// A field-level constraint failure.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ConstraintViolation {
    /// Machine-readable reason
    pub code: ReasonCode,
    /// Human-readable, translatable message
    pub message: String,
}

impl ConstraintViolation {
    pub fn required_empty() -> Self {
        Self {
            code: ReasonCode::RequiredEmpty,
            message: "Required input is missing.".into(),
        }
    }

    pub fn out_of_range(shown: impl std::fmt::Display, min: Option<f64>, max: Option<f64>) -> Self {
        let bounds = match (min, max) {
            (Some(lo), Some(hi)) => format!("between {} and {}", lo, hi),
            (Some(lo), None) => format!("at least {}", lo),
            (None, Some(hi)) => format!("at most {}", hi),
            (None, None) => "in range".into(),
        };
        Self {
            code: ReasonCode::OutOfRange,
            message: format!("Value {} must be {}.", shown, bounds),
        }
    }

    pub fn not_allowed(shown: impl std::fmt::Display) -> Self {
        Self {
            code: ReasonCode::NotAllowed,
            message: format!("Value {} is not among the allowed values.", shown),
        }
    }

    pub fn too_short(length: usize, min_length: usize) -> Self {
        Self {
            code: ReasonCode::TooShort,
            message: format!(
                "Length {} is below the minimum length {}.",
                length, min_length
            ),
        }
    }

    pub fn too_long(length: usize, max_length: usize) -> Self {
        Self {
            code: ReasonCode::TooLong,
            message: format!(
                "Length {} exceeds the maximum length {}.",
                length, max_length
            ),
        }
    }
}

/// Returns the JSON type name for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coercion_error_keeps_raw_value() {
        let raw = json!("not-a-number");
        let err = CoercionError::shape_mismatch(&raw, "int");
        assert_eq!(err.raw, raw);
        assert_eq!(err.expected, "int");
        assert!(err.to_string().contains("not-a-number"));
    }

    #[test]
    fn test_reason_codes_are_stable() {
        assert_eq!(ReasonCode::RequiredEmpty.code(), "REQUIRED_EMPTY");
        assert_eq!(ReasonCode::OutOfRange.code(), "OUT_OF_RANGE");
        assert_eq!(ReasonCode::NotAllowed.code(), "NOT_ALLOWED");
    }

    #[test]
    fn test_out_of_range_message_shapes() {
        let both = ConstraintViolation::out_of_range(7, Some(1.0), Some(5.0));
        assert!(both.message.contains("between 1 and 5"));

        let lower = ConstraintViolation::out_of_range(0, Some(1.0), None);
        assert!(lower.message.contains("at least 1"));

        let upper = ConstraintViolation::out_of_range(9, None, Some(5.0));
        assert!(upper.message.contains("at most 5"));
    }

    #[test]
    fn test_json_type_names() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!(1)), "int");
        assert_eq!(json_type_name(&json!(1.5)), "float");
        assert_eq!(json_type_name(&json!([])), "array");
    }
}
