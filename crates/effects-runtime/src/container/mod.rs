//! # Effects Container
//!
//! Owns the dispatcher and the live document, and exposes the host-facing
//! entry points: dispatch an event, drain asynchronous completions.

pub mod config;
pub mod runtime;

pub use config::{ConfigError, DocumentConfig, RuntimeConfig};
pub use runtime::EditorRuntime;
