//! Schema type definitions
//!
//! Supported field types:
//! - string: UTF-8 string
//! - int: 64-bit signed integer
//! - float: 64-bit floating point
//! - bool: Boolean
//! - choice: string restricted to a declared vocabulary
//! - datetime: RFC 3339 timestamp, normalized to UTC
//! - list: homogeneous collection with an element type
//! - object: nested object with its own field set
//! - reference: UUID of another object
//! - bytes: binary payload, base64-encoded on the wire

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Declared field types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// Boolean
    Bool,
    /// String restricted to an allowed vocabulary
    Choice {
        /// Allowed values
        choices: Vec<String>,
    },
    /// RFC 3339 timestamp
    Datetime,
    /// Homogeneous list with a single element type
    List {
        /// Element type (boxed to allow recursive types)
        #[serde(rename = "element_type")]
        element_type: Box<FieldType>,
    },
    /// Nested object with its own field definitions
    Object {
        /// Nested field definitions, in declaration order
        fields: Vec<FieldDescriptor>,
    },
    /// UUID reference to another object
    Reference,
    /// Binary payload, carried as base64 in JSON
    Bytes,
}

/// Dispatch tag for a field type, used to select a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    String,
    Int,
    Float,
    Bool,
    Choice,
    Datetime,
    List,
    Object,
    Reference,
    Bytes,
}

impl FieldType {
    /// Returns the dispatch tag for this type.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldType::String => FieldKind::String,
            FieldType::Int => FieldKind::Int,
            FieldType::Float => FieldKind::Float,
            FieldType::Bool => FieldKind::Bool,
            FieldType::Choice { .. } => FieldKind::Choice,
            FieldType::Datetime => FieldKind::Datetime,
            FieldType::List { .. } => FieldKind::List,
            FieldType::Object { .. } => FieldKind::Object,
            FieldType::Reference => FieldKind::Reference,
            FieldType::Bytes => FieldKind::Bytes,
        }
    }

    /// Returns the type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
            FieldType::Choice { .. } => "choice",
            FieldType::Datetime => "datetime",
            FieldType::List { .. } => "list",
            FieldType::Object { .. } => "object",
            FieldType::Reference => "reference",
            FieldType::Bytes => "bytes",
        }
    }
}

/// Definition of one schema field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name, unique within its schema
    pub name: String,
    /// Field data type
    #[serde(flatten)]
    pub field_type: FieldType,
    /// Whether a present value may be empty
    #[serde(default)]
    pub required: bool,
    /// Read-only fields are never written through the engine
    #[serde(default)]
    pub readonly: bool,
    /// Lower numeric bound (int and float fields)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper numeric bound (int and float fields)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Lower length bound (string, list, bytes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Upper length bound (string, list, bytes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

impl FieldDescriptor {
    /// Create an optional field of the given type.
    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            readonly: false,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
        }
    }

    /// Create a required field of the given type.
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            required: true,
            ..Self::optional(name, field_type)
        }
    }

    /// Create a read-only field of the given type.
    pub fn read_only(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            readonly: true,
            ..Self::optional(name, field_type)
        }
    }

    /// Attach numeric bounds.
    pub fn with_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Attach length bounds.
    pub fn with_length(mut self, min_length: Option<usize>, max_length: Option<usize>) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }
}

/// Complete panel schema definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Unique schema identifier
    pub schema_id: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field definitions, in declaration order
    pub fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Create a new schema.
    pub fn new(schema_id: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            schema_id: schema_id.into(),
            description: None,
            fields,
        }
    }

    /// Looks up a field descriptor by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validates the schema structure itself (not a payload).
    ///
    /// Field names must be unique, recursively through nested objects.
    pub fn validate_structure(&self) -> Result<(), String> {
        check_unique_names(&self.fields, "")
    }
}

fn check_unique_names(fields: &[FieldDescriptor], path: &str) -> Result<(), String> {
    let mut seen = HashSet::new();
    for field in fields {
        if !seen.insert(field.name.as_str()) {
            let shown = if path.is_empty() {
                field.name.clone()
            } else {
                format!("{}.{}", path, field.name)
            };
            return Err(format!("duplicate field name '{}'", shown));
        }
        if let FieldType::Object { fields: nested } = &field.field_type {
            let nested_path = if path.is_empty() {
                field.name.clone()
            } else {
                format!("{}.{}", path, field.name)
            };
            check_unique_names(nested, &nested_path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> Schema {
        Schema::new(
            "mailsettings",
            vec![
                FieldDescriptor::required("smtp_host", FieldType::String),
                FieldDescriptor::optional("smtp_port", FieldType::Int).with_bounds(Some(1.0), Some(65535.0)),
                FieldDescriptor::optional("use_tls", FieldType::Bool),
            ],
        )
    }

    #[test]
    fn test_schema_structure_valid() {
        assert!(sample_schema().validate_structure().is_ok());
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let schema = Schema::new(
            "broken",
            vec![
                FieldDescriptor::optional("title", FieldType::String),
                FieldDescriptor::optional("title", FieldType::Int),
            ],
        );
        let result = schema.validate_structure();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("title"));
    }

    #[test]
    fn test_nested_duplicate_rejected() {
        let schema = Schema::new(
            "broken",
            vec![FieldDescriptor::optional(
                "address",
                FieldType::Object {
                    fields: vec![
                        FieldDescriptor::optional("city", FieldType::String),
                        FieldDescriptor::optional("city", FieldType::String),
                    ],
                },
            )],
        );
        let result = schema.validate_structure();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("address.city"));
    }

    #[test]
    fn test_field_lookup_preserves_declaration_order() {
        let schema = sample_schema();
        assert_eq!(schema.fields[0].name, "smtp_host");
        assert_eq!(schema.fields[1].name, "smtp_port");
        assert!(schema.field("use_tls").is_some());
        assert!(schema.field("missing").is_none());
    }

    #[test]
    fn test_field_type_names() {
        assert_eq!(FieldType::String.type_name(), "string");
        assert_eq!(FieldType::Datetime.type_name(), "datetime");
        assert_eq!(
            FieldType::Choice { choices: vec![] }.type_name(),
            "choice"
        );
        assert_eq!(
            FieldType::List {
                element_type: Box::new(FieldType::Int)
            }
            .type_name(),
            "list"
        );
    }

    #[test]
    fn test_kind_dispatch_tag() {
        assert_eq!(FieldType::Reference.kind(), FieldKind::Reference);
        assert_eq!(
            FieldType::Object { fields: vec![] }.kind(),
            FieldKind::Object
        );
    }

    #[test]
    fn test_schema_json_round_trip() {
        let schema = sample_schema();
        let encoded = serde_json::to_string(&schema).unwrap();
        let decoded: Schema = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, schema);
    }

    #[test]
    fn test_descriptor_defaults_from_json() {
        let decoded: FieldDescriptor =
            serde_json::from_str(r#"{"name": "title", "type": "string"}"#).unwrap();
        assert!(!decoded.required);
        assert!(!decoded.readonly);
        assert!(decoded.min.is_none());
    }
}
