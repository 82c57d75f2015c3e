//! Sink for persistence outcomes routed by the runtime.

use shared_bus::EditorEvent;

/// Receives persistence outcome events unchanged.
///
/// Implementations react on their own (notices, caches, UI) and may post
/// new events through an `EventSender`; nothing is returned to the dispatch.
pub trait PersistenceObserver: Send + Sync {
    fn observe(&self, event: &EditorEvent);
}
