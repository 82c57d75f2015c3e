//! Reusable block persistence routing.

use shared_bus::{EditorEvent, EffectError, EffectHandler, Effects, EventKind, EventSender};
use shared_types::DocumentAccessor;
use std::sync::Arc;
use tracing::{debug, warn};

use super::spawn_request;
use crate::ports::ReusableBlockPersistence;

/// Event kinds routed to the reusable block collaborator.
pub const REUSABLE_BLOCK_REQUEST_KINDS: [EventKind; 3] = [
    EventKind::FetchReusableBlocks,
    EventKind::SaveReusableBlock,
    EventKind::DeleteReusableBlock,
];

/// Routes reusable block requests to a `ReusableBlockPersistence` collaborator.
#[derive(Clone)]
pub struct ReusableBlockRequestHandler {
    persistence: Arc<dyn ReusableBlockPersistence>,
    sender: EventSender,
}

impl ReusableBlockRequestHandler {
    pub fn new(persistence: Arc<dyn ReusableBlockPersistence>, sender: EventSender) -> Self {
        Self {
            persistence,
            sender,
        }
    }
}

impl EffectHandler for ReusableBlockRequestHandler {
    fn name(&self) -> &'static str {
        "route-reusable-block-request"
    }

    fn handle(
        &self,
        event: &EditorEvent,
        _state: &dyn DocumentAccessor,
    ) -> Result<Effects, EffectError> {
        let persistence = Arc::clone(&self.persistence);

        match *event {
            EditorEvent::FetchReusableBlocks { id } => {
                debug!(id = ?id, "Routing reusable block fetch");
                spawn_request(self.name(), &self.sender, async move {
                    match persistence.fetch(id).await {
                        // Received blocks land before the success marker.
                        Ok(results) => vec![
                            EditorEvent::ReceiveReusableBlocks { results },
                            EditorEvent::FetchReusableBlocksSuccess { id },
                        ],
                        Err(err) => {
                            warn!(id = ?id, error = %err, "Reusable block fetch failed");
                            vec![EditorEvent::FetchReusableBlocksFailure {
                                id,
                                error: err.to_failure(),
                            }]
                        }
                    }
                });
            }
            EditorEvent::SaveReusableBlock { id } => {
                debug!(id, "Routing reusable block save");
                spawn_request(self.name(), &self.sender, async move {
                    match persistence.save(id).await {
                        Ok(updated_id) => {
                            vec![EditorEvent::SaveReusableBlockSuccess { id, updated_id }]
                        }
                        Err(err) => {
                            warn!(id, error = %err, "Reusable block save failed");
                            vec![EditorEvent::SaveReusableBlockFailure {
                                id,
                                error: err.to_failure(),
                            }]
                        }
                    }
                });
            }
            EditorEvent::DeleteReusableBlock { id } => {
                debug!(id, "Routing reusable block delete");
                spawn_request(self.name(), &self.sender, async move {
                    match persistence.delete(id).await {
                        Ok(()) => vec![EditorEvent::DeleteReusableBlockSuccess { id }],
                        Err(err) => {
                            warn!(id, error = %err, "Reusable block delete failed");
                            vec![EditorEvent::DeleteReusableBlockFailure {
                                id,
                                error: err.to_failure(),
                            }]
                        }
                    }
                });
            }
            _ => {
                return Err(EffectError::UnexpectedEvent {
                    handler: self.name(),
                    kind: event.kind(),
                })
            }
        }

        Ok(Vec::new())
    }
}
