//! The schema walker
//!
//! Walks every field the schema declares, in declaration order. Read-only
//! fields and fields absent from the payload are skipped with no error and
//! no write. A field that fails coercion or validation contributes exactly
//! one error and no write; the walk always continues to the next field.
//! Accepted values are written through the proxy immediately, then the
//! schema's cross-field rules run against the accepted set.

use std::collections::BTreeMap;

use serde_json::Value;

use super::errors::{ApplyError, ApplyResult};
use super::report::{ReportBuilder, ValidationError};
use crate::field::{json_type_name, HandlerRegistry, SettingValue};
use crate::i18n::Translator;
use crate::observability::Logger;
use crate::registry::RegistryProxy;
use crate::rules::RuleRegistry;
use crate::schema::Schema;

/// Per-request options.
pub struct ApplyOptions {
    /// Replace internal error classification with one generic label
    pub mask_errors: bool,
    /// Locale used to localize report messages
    pub locale: String,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            mask_errors: true,
            locale: "en".into(),
        }
    }
}

/// The deserialization and validation engine for one panel schema.
///
/// All collaborators arrive by injection; the walker holds no state of
/// its own between requests.
pub struct SchemaWalker<'a> {
    handlers: &'a HandlerRegistry,
    rules: &'a RuleRegistry,
    translator: &'a dyn Translator,
}

impl<'a> SchemaWalker<'a> {
    /// Creates a walker over the given collaborators.
    pub fn new(
        handlers: &'a HandlerRegistry,
        rules: &'a RuleRegistry,
        translator: &'a dyn Translator,
    ) -> Self {
        Self {
            handlers,
            rules,
            translator,
        }
    }

    /// Applies one payload to one schema through the given proxy.
    ///
    /// Accepted values are committed per field while the walk is still in
    /// progress. A failure found later (another field, or a cross-field
    /// rule) does not undo them: on `ValidationFailed`, every field that
    /// individually passed has already been written. Callers that need
    /// all-or-nothing semantics must put a transaction boundary around the
    /// store backing the proxy.
    pub fn apply(
        &self,
        schema: &Schema,
        payload: &Value,
        proxy: &mut RegistryProxy<'_>,
        opts: &ApplyOptions,
    ) -> ApplyResult<()> {
        let data = payload
            .as_object()
            .ok_or_else(|| ApplyError::PayloadShape(json_type_name(payload)))?;

        let ctx = self.handlers.context();
        let mut accepted: BTreeMap<String, SettingValue> = BTreeMap::new();
        let mut errors: Vec<ValidationError> = Vec::new();

        for field in &schema.fields {
            if field.readonly {
                continue;
            }

            let raw = match data.get(&field.name) {
                Some(raw) => raw,
                None => continue,
            };

            let handler = self
                .handlers
                .handler_for(field.field_type.kind())
                .ok_or_else(|| ApplyError::UnsupportedType(field.field_type.type_name()))?;

            let value = match handler.coerce(field, raw, &ctx) {
                Ok(value) => value,
                Err(error) => {
                    errors.push(ValidationError::coercion(&field.name, error));
                    continue;
                }
            };

            if let Err(violation) = handler.validate(field, &value, &ctx) {
                errors.push(ValidationError::constraint(&field.name, violation));
                continue;
            }

            proxy.set(&field.name, value.clone())?;
            accepted.insert(field.name.clone(), value);
        }

        // Cross-field rules run once, even when the accepted set is empty.
        for rule in self.rules.rules_for(&schema.schema_id) {
            for violation in rule.check(&accepted) {
                errors.push(ValidationError::schema_rule(violation));
            }
        }

        let accepted_count = accepted.len().to_string();
        let error_count = errors.len().to_string();

        if errors.is_empty() {
            Logger::info(
                "SETTINGS_APPLIED",
                &[
                    ("accepted", accepted_count.as_str()),
                    ("schema", schema.schema_id.as_str()),
                ],
            );
            Ok(())
        } else {
            Logger::warn(
                "SETTINGS_REJECTED",
                &[
                    ("accepted", accepted_count.as_str()),
                    ("errors", error_count.as_str()),
                    ("schema", schema.schema_id.as_str()),
                ],
            );
            let report =
                ReportBuilder::new(self.translator).build(errors, opts.mask_errors, &opts.locale);
            Err(ApplyError::ValidationFailed(report))
        }
    }
}
