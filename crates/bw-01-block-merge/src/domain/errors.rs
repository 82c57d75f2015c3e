//! Error types for the block type registry

use thiserror::Error;

/// Registry errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A type with this name is already registered
    #[error("Block type already registered: {0}")]
    AlreadyRegistered(String),

    /// Type names must be non-empty
    #[error("Block type name must not be empty")]
    EmptyName,
}
