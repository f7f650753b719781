//! Settings store interface and the in-memory implementation

use std::collections::BTreeMap;

use serde_json::Value;

use super::errors::{StoreError, StoreResult};
use crate::field::SettingValue;

/// A flat key/value settings store.
///
/// The engine writes through this interface only; anything with durable
/// or transactional behavior lives behind it.
pub trait SettingsStore {
    /// Writes one setting.
    fn set(&mut self, key: &str, value: SettingValue) -> StoreResult<()>;

    /// Reads one setting.
    fn get(&self, key: &str) -> Option<&SettingValue>;
}

/// In-memory settings store with deterministic key order.
#[derive(Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, SettingValue>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored settings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reads one setting.
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.entries.get(key)
    }

    /// Removes one setting, failing for unknown keys.
    pub fn remove(&mut self, key: &str) -> StoreResult<SettingValue> {
        self.entries
            .remove(key)
            .ok_or_else(|| StoreError::UnknownKey(key.to_string()))
    }

    /// Projects the whole store to a JSON object, keyed by setting key.
    pub fn dump(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect(),
        )
    }
}

impl SettingsStore for MemoryStore {
    fn set(&mut self, key: &str, value: SettingValue) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn get(&self, key: &str) -> Option<&SettingValue> {
        self.entries.get(key)
    }
}
