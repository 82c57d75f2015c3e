//! # Document Store Port
//!
//! The document container the dispatcher commits events to before running
//! their effects. The core never mutates state itself.

use crate::events::EditorEvent;
use shared_types::{DocumentAccessor, DocumentError};

/// Owner of the live document state.
pub trait DocumentStore: DocumentAccessor {
    /// Commit `event` to the document.
    ///
    /// Events the container has no reducer for are ignored.
    fn apply(&mut self, event: &EditorEvent) -> Result<(), DocumentError>;
}
