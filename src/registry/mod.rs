//! Settings registry subsystem for setreg
//!
//! The registry is the write destination for accepted values: a flat
//! key/value store addressed as `<prefix>.<field>`. The engine only ever
//! writes through a `RegistryProxy` bound to one schema and prefix.

mod errors;
mod proxy;
mod store;

pub use errors::{StoreError, StoreResult};
pub use proxy::RegistryProxy;
pub use store::{MemoryStore, SettingsStore};
