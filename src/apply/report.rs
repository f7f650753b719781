//! Error aggregation, masking and the client-facing report
//!
//! Every failure kind the walk can produce is normalized into one
//! `ValidationError` shape before aggregation. The report builder then
//! localizes each message and, when masking is on, replaces the kind label
//! with one generic label so internal classification never reaches a
//! client.

use serde::Serialize;

use crate::field::{CoercionError, ConstraintViolation};
use crate::i18n::Translator;
use crate::rules::SchemaRuleViolation;

/// Kind label substituted for every record when masking is enabled.
pub const MASKED_KIND: &str = "ValidationError";

/// Internal classification of an aggregated failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Raw value shape mismatch
    Coercion,
    /// Field-level rule failure
    Constraint,
    /// Cross-field rule failure
    SchemaRule,
}

impl ErrorKind {
    /// Returns the classification label.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Coercion => "CoercionError",
            ErrorKind::Constraint => "ConstraintViolation",
            ErrorKind::SchemaRule => "SchemaRuleViolation",
        }
    }
}

/// One normalized failure, aggregated during the walk.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Field name; `None` for schema-level failures
    pub field: Option<String>,
    /// Internal classification
    pub kind: ErrorKind,
    /// Not yet localized
    pub message: String,
}

impl ValidationError {
    /// Normalizes a coercion failure.
    pub fn coercion(field: impl Into<String>, error: CoercionError) -> Self {
        Self {
            field: Some(field.into()),
            kind: ErrorKind::Coercion,
            message: error.to_string(),
        }
    }

    /// Normalizes a field constraint failure.
    pub fn constraint(field: impl Into<String>, violation: ConstraintViolation) -> Self {
        Self {
            field: Some(field.into()),
            kind: ErrorKind::Constraint,
            message: violation.message,
        }
    }

    /// Normalizes a cross-field rule failure.
    pub fn schema_rule(violation: SchemaRuleViolation) -> Self {
        Self {
            field: None,
            kind: ErrorKind::SchemaRule,
            message: violation.message,
        }
    }
}

/// One record of the client-facing report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorRecord {
    /// Field name; `null` for schema-level errors
    pub field: Option<String>,
    /// Localized message
    pub message: String,
    /// Classification label, possibly masked
    #[serde(rename = "errorKind")]
    pub error_kind: String,
}

/// Ordered, client-safe error report. Serializes as a JSON array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Report {
    records: Vec<ErrorRecord>,
}

impl Report {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the report carries no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records, in aggregation order.
    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }
}

/// Builds the final report from aggregated errors.
pub struct ReportBuilder<'a> {
    translator: &'a dyn Translator,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(translator: &'a dyn Translator) -> Self {
        Self { translator }
    }

    /// Localizes every message and applies masking.
    ///
    /// Aggregation order is preserved; nothing is deduplicated.
    pub fn build(&self, errors: Vec<ValidationError>, mask: bool, locale: &str) -> Report {
        let records = errors
            .into_iter()
            .map(|error| ErrorRecord {
                field: error.field,
                message: self.translator.translate(&error.message, locale),
                error_kind: if mask {
                    MASKED_KIND.to_string()
                } else {
                    error.kind.label().to_string()
                },
            })
            .collect();
        Report { records }
    }
}
