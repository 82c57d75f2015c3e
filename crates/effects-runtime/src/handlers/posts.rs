//! Post persistence routing.

use serde_json::json;
use shared_bus::{EditorEvent, EffectError, EffectHandler, Effects, EventKind, EventSender};
use shared_types::DocumentAccessor;
use std::sync::Arc;
use tracing::{debug, warn};

use super::spawn_request;
use crate::ports::PostPersistence;

/// Event kinds routed to the post collaborator.
pub const POST_REQUEST_KINDS: [EventKind; 3] = [
    EventKind::RequestPostUpdate,
    EventKind::TrashPost,
    EventKind::RefreshPost,
];

/// Routes post requests to a `PostPersistence` collaborator.
#[derive(Clone)]
pub struct PostRequestHandler {
    persistence: Arc<dyn PostPersistence>,
    sender: EventSender,
}

impl PostRequestHandler {
    pub fn new(persistence: Arc<dyn PostPersistence>, sender: EventSender) -> Self {
        Self {
            persistence,
            sender,
        }
    }
}

impl EffectHandler for PostRequestHandler {
    fn name(&self) -> &'static str {
        "route-post-request"
    }

    fn handle(
        &self,
        event: &EditorEvent,
        _state: &dyn DocumentAccessor,
    ) -> Result<Effects, EffectError> {
        let persistence = Arc::clone(&self.persistence);

        match event.clone() {
            EditorEvent::RequestPostUpdate {
                post_id,
                edits,
                is_autosave,
            } => {
                debug!(post_id, is_autosave, "Routing post update");
                spawn_request(self.name(), &self.sender, async move {
                    match persistence.update_post(post_id, &edits, is_autosave).await {
                        Ok(update) => vec![EditorEvent::RequestPostUpdateSuccess {
                            previous_post: update.previous,
                            post: update.current,
                            is_autosave,
                        }],
                        Err(err) => {
                            warn!(post_id, error = %err, "Post update failed");
                            vec![EditorEvent::RequestPostUpdateFailure {
                                post: json!({ "id": post_id, "edits": edits }),
                                error: err.to_failure(),
                            }]
                        }
                    }
                });
            }
            EditorEvent::TrashPost { post_id, post_type } => {
                debug!(post_id, post_type = %post_type, "Routing post trash");
                spawn_request(self.name(), &self.sender, async move {
                    match persistence.trash_post(post_id, &post_type).await {
                        Ok(()) => vec![EditorEvent::TrashPostSuccess { post_id }],
                        Err(err) => {
                            warn!(post_id, error = %err, "Post trash failed");
                            vec![EditorEvent::TrashPostFailure {
                                post_id,
                                error: err.to_failure(),
                            }]
                        }
                    }
                });
            }
            EditorEvent::RefreshPost { post_id, post_type } => {
                spawn_request(self.name(), &self.sender, async move {
                    match persistence.refresh_post(post_id, &post_type).await {
                        Ok(post) => vec![EditorEvent::RefreshPostSuccess { post }],
                        // A failed refresh keeps the post the editor already has.
                        Err(err) => {
                            warn!(post_id, error = %err, "Post refresh failed");
                            Vec::new()
                        }
                    }
                });
            }
            other => {
                return Err(EffectError::UnexpectedEvent {
                    handler: self.name(),
                    kind: other.kind(),
                })
            }
        }

        Ok(Vec::new())
    }
}
