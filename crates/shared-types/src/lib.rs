//! # Shared Types Crate
//!
//! This crate contains the document entities shared by every effect
//! subsystem and the read-only `DocumentAccessor` port they consume.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Blocks, templates, selection and history are
//!   defined here and nowhere else.
//! - **Read-Only Core**: Effect subsystems only read through
//!   `DocumentAccessor`; mutation happens in the document container.
//! - **Immutable History**: Snapshots are shared behind `Arc` and never
//!   modified once pushed.

pub mod document;
pub mod entities;
pub mod errors;
pub mod template;

pub use document::*;
pub use entities::*;
pub use errors::*;
pub use template::*;
