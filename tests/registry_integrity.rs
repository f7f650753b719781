//! Registry Integrity Tests
//!
//! The settings store is external to the walk: its failures are fatal,
//! never folded into the validation report.

use serde_json::json;
use setreg::apply::{ApplyError, ApplyOptions, SchemaWalker};
use setreg::field::{HandlerRegistry, SettingValue};
use setreg::i18n::IdentityTranslator;
use setreg::registry::{MemoryStore, RegistryProxy, SettingsStore, StoreError, StoreResult};
use setreg::rules::RuleRegistry;
use setreg::schema::{FieldDescriptor, FieldType, Schema};

/// Store that accepts a fixed number of writes, then fails.
struct FlakyStore {
    inner: MemoryStore,
    writes_left: usize,
}

impl FlakyStore {
    fn new(writes_left: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            writes_left,
        }
    }
}

impl SettingsStore for FlakyStore {
    fn set(&mut self, key: &str, value: SettingValue) -> StoreResult<()> {
        if self.writes_left == 0 {
            return Err(StoreError::Backend("write refused".into()));
        }
        self.writes_left -= 1;
        self.inner.set(key, value)
    }

    fn get(&self, key: &str) -> Option<&SettingValue> {
        self.inner.get(key)
    }
}

fn two_field_schema() -> Schema {
    Schema::new(
        "panel",
        vec![
            FieldDescriptor::optional("first", FieldType::Int),
            FieldDescriptor::optional("second", FieldType::Int),
        ],
    )
}

#[test]
fn test_proxy_keys_are_prefix_dot_field() {
    let schema = two_field_schema();
    let mut store = MemoryStore::new();

    {
        let mut proxy = RegistryProxy::for_schema(&mut store, &schema);
        proxy.set("first", SettingValue::Int(1)).unwrap();
    }
    {
        let mut proxy = RegistryProxy::with_prefix(&mut store, "site.panel");
        proxy.set("first", SettingValue::Int(2)).unwrap();
    }

    assert_eq!(store.get("panel.first"), Some(&SettingValue::Int(1)));
    assert_eq!(store.get("site.panel.first"), Some(&SettingValue::Int(2)));
}

#[test]
fn test_store_failure_aborts_walk() {
    let schema = two_field_schema();
    let handlers = HandlerRegistry::standard();
    let rules = RuleRegistry::new();
    let translator = IdentityTranslator;
    let walker = SchemaWalker::new(&handlers, &rules, &translator);

    let mut store = FlakyStore::new(1);
    let mut proxy = RegistryProxy::with_prefix(&mut store, "panel");

    let result = walker.apply(
        &schema,
        &json!({"first": 1, "second": 2}),
        &mut proxy,
        &ApplyOptions::default(),
    );

    // The second write fails; the error is a store fault, not a report
    assert!(matches!(result, Err(ApplyError::Store(_))));
    // The first write already landed; the engine does not roll it back
    assert_eq!(store.get("panel.first"), Some(&SettingValue::Int(1)));
    assert!(store.get("panel.second").is_none());
}

#[test]
fn test_dump_reflects_applied_settings() {
    let schema = two_field_schema();
    let handlers = HandlerRegistry::standard();
    let rules = RuleRegistry::new();
    let translator = IdentityTranslator;
    let walker = SchemaWalker::new(&handlers, &rules, &translator);

    let mut store = MemoryStore::new();
    let mut proxy = RegistryProxy::for_schema(&mut store, &schema);
    walker
        .apply(
            &schema,
            &json!({"first": 10, "second": 20}),
            &mut proxy,
            &ApplyOptions::default(),
        )
        .unwrap();

    assert_eq!(
        store.dump(),
        json!({"panel.first": 10, "panel.second": 20})
    );
}
