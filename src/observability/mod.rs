//! Observability subsystem for setreg
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. Logs are synchronous, no buffering
//! 3. One log line = one event
//! 4. Deterministic output (alphabetical field ordering)

mod logger;

pub use logger::{Logger, Severity};
