//! # Effect Wiring
//!
//! Registers every effect subsystem on a dispatcher.
//!
//! Each subsystem exposes its handlers; the runtime supplies the
//! collaborators they depend on (block type table, announcer, persistence)
//! and decides which event kind each handler answers to.

pub mod effects;

pub use effects::{build_dispatcher, register_effects, Collaborators};
