//! # Effects Runtime Library
//!
//! Wires the effect subsystems into one dispatcher and provides the
//! in-memory document container and persistence collaborators. The
//! `effects-runtime` binary replays session files through it.
//!
//! ## Layout
//!
//! - `container/` - Runtime configuration and the host-facing `EditorRuntime`
//! - `adapters/` - In-memory document, persistence stores, observers
//! - `ports/` - Collaborator contracts (persistence, observer)
//! - `handlers/` - Routing of persistence events to collaborators
//! - `wiring/` - The default event → handler table
//! - `session` - Replay session files

pub mod adapters;
pub mod container;
pub mod handlers;
pub mod ports;
pub mod session;
pub mod wiring;

pub use container::{ConfigError, DocumentConfig, EditorRuntime, RuntimeConfig};
pub use session::Session;
pub use wiring::{build_dispatcher, register_effects, Collaborators};
