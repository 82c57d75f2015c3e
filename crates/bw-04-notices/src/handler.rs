//! Create Notice Handler

use crate::ports::{Announcer, Politeness};
use shared_bus::{EditorEvent, EffectError, EffectHandler, Effects, Notice};
use shared_types::DocumentAccessor;
use std::sync::Arc;
use tracing::{debug, warn};

/// Text to speak for `notice`: the spoken message when set and non-empty,
/// the visible content otherwise.
pub fn spoken_text(notice: &Notice) -> &str {
    notice
        .spoken_message
        .as_deref()
        .filter(|message| !message.is_empty())
        .unwrap_or(&notice.content)
}

/// Handler for `CreateNotice`.
pub struct CreateNoticeHandler {
    announcer: Arc<dyn Announcer>,
}

impl CreateNoticeHandler {
    pub fn new(announcer: Arc<dyn Announcer>) -> Self {
        Self { announcer }
    }
}

impl EffectHandler for CreateNoticeHandler {
    fn name(&self) -> &'static str {
        "announce-notice"
    }

    fn handle(
        &self,
        event: &EditorEvent,
        _state: &dyn DocumentAccessor,
    ) -> Result<Effects, EffectError> {
        let EditorEvent::CreateNotice { notice } = event else {
            return Err(EffectError::UnexpectedEvent {
                handler: self.name(),
                kind: event.kind(),
            });
        };

        let message = spoken_text(notice);
        match self.announcer.speak(message, Politeness::Assertive) {
            Ok(()) => debug!(notice_id = ?notice.id, "Notice announced"),
            Err(err) => warn!(notice_id = ?notice.id, error = %err, "Notice announcement failed"),
        }

        Ok(Vec::new())
    }
}
