//! # Error Types
//!
//! Defines error types used across subsystems.

use crate::entities::ClientId;
use thiserror::Error;

/// Errors raised by block tree mutations in the document container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// Referenced block is not part of the document.
    #[error("Block not found: {0}")]
    BlockNotFound(ClientId),

    /// A replacement was requested without any block to replace.
    #[error("Replacement requires at least one client id")]
    EmptyReplacement,
}
