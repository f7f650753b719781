//! Built-in field handlers, one per declared field type
//!
//! Coercion is strict: no implicit cross-type conversion. An int field
//! rejects floats and numeric strings; the only widening is that float
//! fields accept whole numbers.

use base64::Engine;
use chrono::{DateTime, Utc};
use serde_json::Value;

use super::errors::{CoercionError, ConstraintViolation};
use super::handler::{check_common, FieldContext, FieldHandler};
use super::value::SettingValue;
use crate::schema::{FieldDescriptor, FieldType};

fn check_range(field: &FieldDescriptor, shown: f64) -> Result<(), ConstraintViolation> {
    if let Some(min) = field.min {
        if shown < min {
            return Err(ConstraintViolation::out_of_range(shown, field.min, field.max));
        }
    }
    if let Some(max) = field.max {
        if shown > max {
            return Err(ConstraintViolation::out_of_range(shown, field.min, field.max));
        }
    }
    Ok(())
}

/// UTF-8 strings.
pub struct StringHandler;

impl FieldHandler for StringHandler {
    fn coerce(
        &self,
        _field: &FieldDescriptor,
        raw: &Value,
        _ctx: &FieldContext<'_>,
    ) -> Result<SettingValue, CoercionError> {
        match raw.as_str() {
            Some(s) => Ok(SettingValue::Str(s.to_string())),
            None => Err(CoercionError::shape_mismatch(raw, "string")),
        }
    }
}

/// 64-bit signed integers. Floats are not silently truncated.
pub struct IntHandler;

impl FieldHandler for IntHandler {
    fn coerce(
        &self,
        _field: &FieldDescriptor,
        raw: &Value,
        _ctx: &FieldContext<'_>,
    ) -> Result<SettingValue, CoercionError> {
        match raw.as_i64() {
            Some(n) => Ok(SettingValue::Int(n)),
            None => Err(CoercionError::shape_mismatch(raw, "int")),
        }
    }

    fn validate(
        &self,
        field: &FieldDescriptor,
        value: &SettingValue,
        _ctx: &FieldContext<'_>,
    ) -> Result<(), ConstraintViolation> {
        check_common(field, value)?;
        if let SettingValue::Int(n) = value {
            check_range(field, *n as f64)?;
        }
        Ok(())
    }
}

/// 64-bit floats. Whole numbers are accepted as floats.
pub struct FloatHandler;

impl FieldHandler for FloatHandler {
    fn coerce(
        &self,
        _field: &FieldDescriptor,
        raw: &Value,
        _ctx: &FieldContext<'_>,
    ) -> Result<SettingValue, CoercionError> {
        match raw.as_f64() {
            Some(x) => Ok(SettingValue::Float(x)),
            None => Err(CoercionError::shape_mismatch(raw, "float")),
        }
    }

    fn validate(
        &self,
        field: &FieldDescriptor,
        value: &SettingValue,
        _ctx: &FieldContext<'_>,
    ) -> Result<(), ConstraintViolation> {
        check_common(field, value)?;
        if let SettingValue::Float(x) = value {
            check_range(field, *x)?;
        }
        Ok(())
    }
}

/// Booleans.
pub struct BoolHandler;

impl FieldHandler for BoolHandler {
    fn coerce(
        &self,
        _field: &FieldDescriptor,
        raw: &Value,
        _ctx: &FieldContext<'_>,
    ) -> Result<SettingValue, CoercionError> {
        match raw.as_bool() {
            Some(b) => Ok(SettingValue::Bool(b)),
            None => Err(CoercionError::shape_mismatch(raw, "bool")),
        }
    }
}

/// Strings restricted to a declared vocabulary.
pub struct ChoiceHandler;

impl FieldHandler for ChoiceHandler {
    fn coerce(
        &self,
        _field: &FieldDescriptor,
        raw: &Value,
        _ctx: &FieldContext<'_>,
    ) -> Result<SettingValue, CoercionError> {
        match raw.as_str() {
            Some(s) => Ok(SettingValue::Str(s.to_string())),
            None => Err(CoercionError::shape_mismatch(raw, "choice")),
        }
    }

    fn validate(
        &self,
        field: &FieldDescriptor,
        value: &SettingValue,
        _ctx: &FieldContext<'_>,
    ) -> Result<(), ConstraintViolation> {
        check_common(field, value)?;
        if let (FieldType::Choice { choices }, SettingValue::Str(s)) = (&field.field_type, value) {
            if !choices.iter().any(|allowed| allowed == s) {
                return Err(ConstraintViolation::not_allowed(format!("'{}'", s)));
            }
        }
        Ok(())
    }
}

/// RFC 3339 timestamps, normalized to UTC.
pub struct DatetimeHandler;

impl FieldHandler for DatetimeHandler {
    fn coerce(
        &self,
        _field: &FieldDescriptor,
        raw: &Value,
        _ctx: &FieldContext<'_>,
    ) -> Result<SettingValue, CoercionError> {
        let s = raw
            .as_str()
            .ok_or_else(|| CoercionError::shape_mismatch(raw, "datetime"))?;
        let parsed = DateTime::parse_from_rfc3339(s)
            .map_err(|e| CoercionError::malformed(raw, "datetime", e.to_string()))?;
        Ok(SettingValue::Datetime(parsed.with_timezone(&Utc)))
    }
}

/// Homogeneous lists; each element goes through its own handler.
pub struct ListHandler;

impl ListHandler {
    fn element_descriptor(field: &FieldDescriptor, index: usize) -> Option<FieldDescriptor> {
        match &field.field_type {
            FieldType::List { element_type } => Some(FieldDescriptor::optional(
                format!("{}[{}]", field.name, index),
                (**element_type).clone(),
            )),
            _ => None,
        }
    }
}

impl FieldHandler for ListHandler {
    fn coerce(
        &self,
        field: &FieldDescriptor,
        raw: &Value,
        ctx: &FieldContext<'_>,
    ) -> Result<SettingValue, CoercionError> {
        let items = raw
            .as_array()
            .ok_or_else(|| CoercionError::shape_mismatch(raw, "list"))?;

        let mut coerced = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let elem_field = Self::element_descriptor(field, index)
                .ok_or_else(|| CoercionError::shape_mismatch(raw, "list"))?;
            let handler = ctx.handler_for(elem_field.field_type.kind()).ok_or_else(|| {
                CoercionError::malformed(
                    raw,
                    "list",
                    format!(
                        "no handler registered for element type '{}'",
                        elem_field.field_type.type_name()
                    ),
                )
            })?;
            let value = handler.coerce(&elem_field, item, ctx).map_err(|e| {
                CoercionError::malformed(raw, "list", format!("element {}: {}", index, e))
            })?;
            coerced.push(value);
        }

        Ok(SettingValue::List(coerced))
    }

    fn validate(
        &self,
        field: &FieldDescriptor,
        value: &SettingValue,
        ctx: &FieldContext<'_>,
    ) -> Result<(), ConstraintViolation> {
        check_common(field, value)?;

        // Element constraints (a choice vocabulary, nested bounds) go
        // through the element handler.
        if let SettingValue::List(items) = value {
            for (index, item) in items.iter().enumerate() {
                if let Some(elem_field) = Self::element_descriptor(field, index) {
                    if let Some(handler) = ctx.handler_for(elem_field.field_type.kind()) {
                        handler.validate(&elem_field, item, ctx).map_err(|v| {
                            ConstraintViolation {
                                code: v.code,
                                message: format!("Element {}: {}", index, v.message),
                            }
                        })?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Nested objects with a declared field set.
///
/// The nested field set is strict: undeclared keys and missing required
/// nested fields are structural failures of the whole field.
pub struct ObjectHandler;

impl FieldHandler for ObjectHandler {
    fn coerce(
        &self,
        field: &FieldDescriptor,
        raw: &Value,
        ctx: &FieldContext<'_>,
    ) -> Result<SettingValue, CoercionError> {
        let obj = raw
            .as_object()
            .ok_or_else(|| CoercionError::shape_mismatch(raw, "object"))?;

        let nested = match &field.field_type {
            FieldType::Object { fields } => fields,
            _ => return Err(CoercionError::shape_mismatch(raw, "object")),
        };

        for key in obj.keys() {
            if !nested.iter().any(|f| &f.name == key) {
                return Err(CoercionError::malformed(
                    raw,
                    "object",
                    format!("undeclared key '{}'", key),
                ));
            }
        }

        let mut coerced = std::collections::BTreeMap::new();
        for nested_field in nested {
            match obj.get(&nested_field.name) {
                Some(item) => {
                    let handler =
                        ctx.handler_for(nested_field.field_type.kind()).ok_or_else(|| {
                            CoercionError::malformed(
                                raw,
                                "object",
                                format!(
                                    "no handler registered for nested type '{}'",
                                    nested_field.field_type.type_name()
                                ),
                            )
                        })?;
                    let value = handler.coerce(nested_field, item, ctx).map_err(|e| {
                        CoercionError::malformed(
                            raw,
                            "object",
                            format!("key '{}': {}", nested_field.name, e),
                        )
                    })?;
                    coerced.insert(nested_field.name.clone(), value);
                }
                None if nested_field.required => {
                    return Err(CoercionError::malformed(
                        raw,
                        "object",
                        format!("missing required key '{}'", nested_field.name),
                    ));
                }
                None => {}
            }
        }

        Ok(SettingValue::Object(coerced))
    }

    fn validate(
        &self,
        field: &FieldDescriptor,
        value: &SettingValue,
        ctx: &FieldContext<'_>,
    ) -> Result<(), ConstraintViolation> {
        check_common(field, value)?;

        let nested = match &field.field_type {
            FieldType::Object { fields } => fields,
            _ => return Ok(()),
        };

        if let SettingValue::Object(values) = value {
            for nested_field in nested {
                if let Some(item) = values.get(&nested_field.name) {
                    if let Some(handler) = ctx.handler_for(nested_field.field_type.kind()) {
                        handler.validate(nested_field, item, ctx).map_err(|v| {
                            ConstraintViolation {
                                code: v.code,
                                message: format!("Key '{}': {}", nested_field.name, v.message),
                            }
                        })?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// UUID references to other objects.
pub struct ReferenceHandler;

impl FieldHandler for ReferenceHandler {
    fn coerce(
        &self,
        _field: &FieldDescriptor,
        raw: &Value,
        _ctx: &FieldContext<'_>,
    ) -> Result<SettingValue, CoercionError> {
        let s = raw
            .as_str()
            .ok_or_else(|| CoercionError::shape_mismatch(raw, "reference"))?;
        let id = uuid::Uuid::parse_str(s)
            .map_err(|e| CoercionError::malformed(raw, "reference", e.to_string()))?;
        Ok(SettingValue::Reference(id))
    }
}

/// Binary payloads, base64-encoded on the wire.
pub struct BytesHandler;

impl FieldHandler for BytesHandler {
    fn coerce(
        &self,
        _field: &FieldDescriptor,
        raw: &Value,
        _ctx: &FieldContext<'_>,
    ) -> Result<SettingValue, CoercionError> {
        let s = raw
            .as_str()
            .ok_or_else(|| CoercionError::shape_mismatch(raw, "bytes"))?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(s)
            .map_err(|e| CoercionError::malformed(raw, "bytes", e.to_string()))?;
        Ok(SettingValue::Bytes(bytes))
    }
}
