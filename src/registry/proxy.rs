//! Prefix-bound registry proxy
//!
//! A proxy is acquired once per request, before the walk begins, bound to
//! one schema and one naming prefix. Every accepted value for field `f`
//! lands at key `<prefix>.<f>`.

use super::errors::StoreResult;
use super::store::SettingsStore;
use crate::field::SettingValue;
use crate::schema::Schema;

/// Write handle for one schema's settings.
pub struct RegistryProxy<'a> {
    store: &'a mut dyn SettingsStore,
    prefix: String,
}

impl<'a> RegistryProxy<'a> {
    /// Binds a proxy to a schema, using the schema id as prefix.
    pub fn for_schema(store: &'a mut dyn SettingsStore, schema: &Schema) -> Self {
        Self {
            store,
            prefix: schema.schema_id.clone(),
        }
    }

    /// Binds a proxy to a schema under an explicit prefix.
    pub fn with_prefix(store: &'a mut dyn SettingsStore, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    /// Returns the naming prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the full store key for a field.
    pub fn key_for(&self, field: &str) -> String {
        format!("{}.{}", self.prefix, field)
    }

    /// Writes one accepted field value.
    pub fn set(&mut self, field: &str, value: SettingValue) -> StoreResult<()> {
        let key = self.key_for(field);
        self.store.set(&key, value)
    }

    /// Reads one field value back.
    pub fn get(&self, field: &str) -> Option<&SettingValue> {
        self.store.get(&self.key_for(field))
    }
}
