//! Delivery of persistence outcomes to the observer collaborator.

use shared_bus::{EditorEvent, EffectError, EffectHandler, Effects, EventKind};
use shared_types::DocumentAccessor;
use std::sync::Arc;
use tracing::trace;

use crate::ports::PersistenceObserver;

/// Outcome and conversion events delivered to the observer unchanged.
pub const OBSERVED_KINDS: [EventKind; 6] = [
    EventKind::RequestPostUpdateSuccess,
    EventKind::RequestPostUpdateFailure,
    EventKind::TrashPostFailure,
    EventKind::ReceiveReusableBlocks,
    EventKind::ConvertBlockToStatic,
    EventKind::ConvertBlockToReusable,
];

/// Forwards routed events to a `PersistenceObserver`.
#[derive(Clone)]
pub struct ObserverHandler {
    observer: Arc<dyn PersistenceObserver>,
}

impl ObserverHandler {
    pub fn new(observer: Arc<dyn PersistenceObserver>) -> Self {
        Self { observer }
    }
}

impl EffectHandler for ObserverHandler {
    fn name(&self) -> &'static str {
        "persistence-observer"
    }

    fn handle(
        &self,
        event: &EditorEvent,
        _state: &dyn DocumentAccessor,
    ) -> Result<Effects, EffectError> {
        let kind = event.kind();
        if !OBSERVED_KINDS.contains(&kind) {
            return Err(EffectError::UnexpectedEvent {
                handler: self.name(),
                kind,
            });
        }

        trace!(kind = ?kind, "Delivering to persistence observer");
        self.observer.observe(event);
        Ok(Vec::new())
    }
}
