//! Field handler interface and registry
//!
//! Each declared field type has one handler implementing both halves of
//! field processing: `coerce` turns a raw JSON value into a native
//! `SettingValue`, `validate` checks the descriptor's constraints against
//! the coerced value. The walker selects handlers through a tag map built
//! at startup and receives the registry by injection.

use std::collections::HashMap;

use serde_json::Value;

use super::errors::{CoercionError, ConstraintViolation};
use super::handlers;
use super::value::SettingValue;
use crate::schema::{FieldDescriptor, FieldKind};

/// Context handed to handlers.
///
/// Composite handlers (list, object) use it to re-dispatch on their
/// element and nested field types. It carries nothing else.
pub struct FieldContext<'a> {
    registry: &'a HandlerRegistry,
}

impl<'a> FieldContext<'a> {
    /// Looks up the handler for a field kind.
    pub fn handler_for(&self, kind: FieldKind) -> Option<&'a dyn FieldHandler> {
        self.registry.handler_for(kind)
    }
}

/// Coercion and constraint checking for one field type.
pub trait FieldHandler {
    /// Converts a raw JSON value into the field's native type.
    ///
    /// Pure; fails with `CoercionError` when the raw shape or content does
    /// not match the declared type.
    fn coerce(
        &self,
        field: &FieldDescriptor,
        raw: &Value,
        ctx: &FieldContext<'_>,
    ) -> Result<SettingValue, CoercionError>;

    /// Checks the descriptor's constraints against a coerced value.
    ///
    /// Violations are ordinary return values; the walk records them and
    /// moves on. The default covers the constraints shared by all types:
    /// required-but-empty and length bounds.
    fn validate(
        &self,
        field: &FieldDescriptor,
        value: &SettingValue,
        _ctx: &FieldContext<'_>,
    ) -> Result<(), ConstraintViolation> {
        check_common(field, value)
    }
}

/// Shared constraint checks: required-but-empty and length bounds.
pub(crate) fn check_common(
    field: &FieldDescriptor,
    value: &SettingValue,
) -> Result<(), ConstraintViolation> {
    if field.required && value.is_empty() {
        return Err(ConstraintViolation::required_empty());
    }

    if let Some(length) = value.length() {
        if let Some(min_length) = field.min_length {
            if length < min_length {
                return Err(ConstraintViolation::too_short(length, min_length));
            }
        }
        if let Some(max_length) = field.max_length {
            if length > max_length {
                return Err(ConstraintViolation::too_long(length, max_length));
            }
        }
    }

    Ok(())
}

/// Maps each field kind to its handler.
///
/// Built once at startup; `register` extends or replaces entries without
/// touching the walker.
pub struct HandlerRegistry {
    handlers: HashMap<FieldKind, Box<dyn FieldHandler>>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Creates a registry covering every built-in field type.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(FieldKind::String, Box::new(handlers::StringHandler));
        registry.register(FieldKind::Int, Box::new(handlers::IntHandler));
        registry.register(FieldKind::Float, Box::new(handlers::FloatHandler));
        registry.register(FieldKind::Bool, Box::new(handlers::BoolHandler));
        registry.register(FieldKind::Choice, Box::new(handlers::ChoiceHandler));
        registry.register(FieldKind::Datetime, Box::new(handlers::DatetimeHandler));
        registry.register(FieldKind::List, Box::new(handlers::ListHandler));
        registry.register(FieldKind::Object, Box::new(handlers::ObjectHandler));
        registry.register(FieldKind::Reference, Box::new(handlers::ReferenceHandler));
        registry.register(FieldKind::Bytes, Box::new(handlers::BytesHandler));
        registry
    }

    /// Registers (or replaces) the handler for a field kind.
    pub fn register(&mut self, kind: FieldKind, handler: Box<dyn FieldHandler>) {
        self.handlers.insert(kind, handler);
    }

    /// Looks up the handler for a field kind.
    pub fn handler_for(&self, kind: FieldKind) -> Option<&dyn FieldHandler> {
        self.handlers.get(&kind).map(|h| h.as_ref())
    }

    /// Returns a dispatch context backed by this registry.
    pub fn context(&self) -> FieldContext<'_> {
        FieldContext { registry: self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;
    use serde_json::json;

    #[test]
    fn test_standard_registry_covers_all_kinds() {
        let registry = HandlerRegistry::standard();
        for kind in [
            FieldKind::String,
            FieldKind::Int,
            FieldKind::Float,
            FieldKind::Bool,
            FieldKind::Choice,
            FieldKind::Datetime,
            FieldKind::List,
            FieldKind::Object,
            FieldKind::Reference,
            FieldKind::Bytes,
        ] {
            assert!(registry.handler_for(kind).is_some(), "{:?}", kind);
        }
    }

    #[test]
    fn test_empty_registry_has_no_handlers() {
        let registry = HandlerRegistry::empty();
        assert!(registry.handler_for(FieldKind::String).is_none());
    }

    #[test]
    fn test_custom_handler_registration() {
        struct UpperHandler;

        impl FieldHandler for UpperHandler {
            fn coerce(
                &self,
                _field: &FieldDescriptor,
                raw: &Value,
                _ctx: &FieldContext<'_>,
            ) -> Result<SettingValue, CoercionError> {
                let s = raw
                    .as_str()
                    .ok_or_else(|| CoercionError::shape_mismatch(raw, "string"))?;
                Ok(SettingValue::Str(s.to_uppercase()))
            }
        }

        let mut registry = HandlerRegistry::standard();
        registry.register(FieldKind::String, Box::new(UpperHandler));

        let field = FieldDescriptor::optional("title", FieldType::String);
        let ctx = registry.context();
        let handler = registry.handler_for(FieldKind::String).unwrap();
        let value = handler.coerce(&field, &json!("hello"), &ctx).unwrap();
        assert_eq!(value, SettingValue::Str("HELLO".into()));
    }

    #[test]
    fn test_common_checks_required_empty() {
        let field = FieldDescriptor::required("title", FieldType::String);
        let result = check_common(&field, &SettingValue::Str(String::new()));
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code.code(), "REQUIRED_EMPTY");
    }

    #[test]
    fn test_common_checks_length_bounds() {
        let field =
            FieldDescriptor::optional("title", FieldType::String).with_length(Some(2), Some(4));

        assert!(check_common(&field, &SettingValue::Str("abc".into())).is_ok());

        let short = check_common(&field, &SettingValue::Str("a".into()));
        assert_eq!(short.unwrap_err().code.code(), "TOO_SHORT");

        let long = check_common(&field, &SettingValue::Str("abcde".into()));
        assert_eq!(long.unwrap_err().code.code(), "TOO_LONG");
    }
}
