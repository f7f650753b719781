//! Cross-field validation rules for setreg
//!
//! Schema-level rules run once per schema, after every field has been
//! walked, against the accepted value set only. Fields that failed
//! coercion or constraint checks never reach a rule.

use std::collections::{BTreeMap, HashMap};

use crate::field::SettingValue;

/// One cross-field rule violation.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaRuleViolation {
    /// Name of the rule that fired
    pub rule: String,
    /// Human-readable, translatable message
    pub message: String,
}

impl SchemaRuleViolation {
    pub fn new(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            message: message.into(),
        }
    }
}

/// A schema-level validation rule.
///
/// `check` sees only values that individually passed field validation;
/// it returns every violation it finds rather than stopping at the first.
pub trait SchemaRule {
    /// Rule name, used in violation records.
    fn name(&self) -> &str;

    /// Runs the rule against the accepted value set.
    fn check(&self, accepted: &BTreeMap<String, SettingValue>) -> Vec<SchemaRuleViolation>;
}

/// Maps schema identifiers to their ordered rule lists.
#[derive(Default)]
pub struct RuleRegistry {
    rules: HashMap<String, Vec<Box<dyn SchemaRule>>>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule for a schema.
    pub fn add_rule(&mut self, schema_id: impl Into<String>, rule: Box<dyn SchemaRule>) {
        self.rules.entry(schema_id.into()).or_default().push(rule);
    }

    /// Returns the rules for a schema, in registration order.
    pub fn rules_for(&self, schema_id: &str) -> &[Box<dyn SchemaRule>] {
        self.rules.get(schema_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Two fields may not both carry a value.
pub struct MutuallyExclusive {
    first: String,
    second: String,
}

impl MutuallyExclusive {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }
}

impl SchemaRule for MutuallyExclusive {
    fn name(&self) -> &str {
        "mutually_exclusive"
    }

    fn check(&self, accepted: &BTreeMap<String, SettingValue>) -> Vec<SchemaRuleViolation> {
        if accepted.contains_key(&self.first) && accepted.contains_key(&self.second) {
            vec![SchemaRuleViolation::new(
                self.name(),
                format!(
                    "Fields '{}' and '{}' cannot be set together.",
                    self.first, self.second
                ),
            )]
        } else {
            Vec::new()
        }
    }
}

/// Setting one field requires another field in the same request.
pub struct RequiresWith {
    field: String,
    requires: String,
}

impl RequiresWith {
    pub fn new(field: impl Into<String>, requires: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            requires: requires.into(),
        }
    }
}

impl SchemaRule for RequiresWith {
    fn name(&self) -> &str {
        "requires_with"
    }

    fn check(&self, accepted: &BTreeMap<String, SettingValue>) -> Vec<SchemaRuleViolation> {
        if accepted.contains_key(&self.field) && !accepted.contains_key(&self.requires) {
            vec![SchemaRuleViolation::new(
                self.name(),
                format!(
                    "Field '{}' requires field '{}' to be set as well.",
                    self.field, self.requires
                ),
            )]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepted(pairs: &[(&str, SettingValue)]) -> BTreeMap<String, SettingValue> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn test_mutually_exclusive_fires_only_on_both() {
        let rule = MutuallyExclusive::new("use_tls", "use_ssl");

        let both = accepted(&[
            ("use_tls", SettingValue::Bool(true)),
            ("use_ssl", SettingValue::Bool(true)),
        ]);
        assert_eq!(rule.check(&both).len(), 1);

        let one = accepted(&[("use_tls", SettingValue::Bool(true))]);
        assert!(rule.check(&one).is_empty());

        assert!(rule.check(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_requires_with() {
        let rule = RequiresWith::new("smtp_pass", "smtp_user");

        let alone = accepted(&[("smtp_pass", SettingValue::Str("secret".into()))]);
        let violations = rule.check(&alone);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("smtp_user"));

        let paired = accepted(&[
            ("smtp_pass", SettingValue::Str("secret".into())),
            ("smtp_user", SettingValue::Str("admin".into())),
        ]);
        assert!(rule.check(&paired).is_empty());
    }

    #[test]
    fn test_registry_keeps_registration_order() {
        let mut registry = RuleRegistry::new();
        registry.add_rule("mail", Box::new(RequiresWith::new("a", "b")));
        registry.add_rule("mail", Box::new(MutuallyExclusive::new("c", "d")));

        let rules = registry.rules_for("mail");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].name(), "requires_with");
        assert_eq!(rules[1].name(), "mutually_exclusive");
    }

    #[test]
    fn test_registry_unknown_schema_is_empty() {
        let registry = RuleRegistry::new();
        assert!(registry.rules_for("nothing").is_empty());
    }
}
