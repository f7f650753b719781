//! Message localization interface
//!
//! The engine never ships translation catalogs; it resolves each report
//! message through this interface with the request-derived locale. The
//! identity translator is the default for embedders without catalogs.

use std::collections::HashMap;

/// Resolves a message template for a locale.
pub trait Translator {
    /// Returns the localized message, or the input unchanged on a miss.
    fn translate(&self, message: &str, locale: &str) -> String;
}

/// Passes every message through unchanged.
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, message: &str, _locale: &str) -> String {
        message.to_string()
    }
}

/// Catalog-backed translator keyed by (locale, message).
#[derive(Default)]
pub struct CatalogTranslator {
    catalogs: HashMap<String, HashMap<String, String>>,
}

impl CatalogTranslator {
    /// Creates an empty catalog set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one translation entry.
    pub fn with_entry(
        mut self,
        locale: impl Into<String>,
        message: impl Into<String>,
        translated: impl Into<String>,
    ) -> Self {
        self.catalogs
            .entry(locale.into())
            .or_default()
            .insert(message.into(), translated.into());
        self
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, message: &str, locale: &str) -> String {
        self.catalogs
            .get(locale)
            .and_then(|catalog| catalog.get(message))
            .cloned()
            .unwrap_or_else(|| message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_passthrough() {
        let t = IdentityTranslator;
        assert_eq!(t.translate("Required input is missing.", "de"), "Required input is missing.");
    }

    #[test]
    fn test_catalog_hit_and_miss() {
        let t = CatalogTranslator::new().with_entry(
            "de",
            "Required input is missing.",
            "Pflichtfeld fehlt.",
        );

        assert_eq!(
            t.translate("Required input is missing.", "de"),
            "Pflichtfeld fehlt."
        );
        // Unknown locale falls back to the original message
        assert_eq!(
            t.translate("Required input is missing.", "fr"),
            "Required input is missing."
        );
        // Unknown message falls back too
        assert_eq!(t.translate("Other message.", "de"), "Other message.");
    }
}
