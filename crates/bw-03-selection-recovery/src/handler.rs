//! Remove Blocks Handler

use crate::domain::recovery::previous_block_candidate;
use shared_bus::{EditorEvent, EffectError, EffectHandler, Effects, EventKind};
use shared_types::{Caret, DocumentAccessor};
use tracing::debug;

/// Handler for `RemoveBlocks` with `select_previous` set.
#[derive(Debug, Default, Clone, Copy)]
pub struct RemoveBlocksHandler;

impl EffectHandler for RemoveBlocksHandler {
    fn name(&self) -> &'static str {
        "select-previous-block"
    }

    fn handle(
        &self,
        event: &EditorEvent,
        state: &dyn DocumentAccessor,
    ) -> Result<Effects, EffectError> {
        let EditorEvent::RemoveBlocks {
            client_ids,
            select_previous,
        } = event
        else {
            return Err(EffectError::UnexpectedEvent {
                handler: self.name(),
                kind: event.kind(),
            });
        };

        if !select_previous {
            return Ok(Vec::new());
        }

        let first_removed = client_ids.first().ok_or_else(|| EffectError::MalformedPayload {
            kind: EventKind::RemoveBlocks,
            reason: "no client ids".to_string(),
        })?;

        let Some(candidate) = previous_block_candidate(state, first_removed)? else {
            debug!(removed = %first_removed, "Removed block had no predecessor");
            return Ok(Vec::new());
        };

        if state.selected_block_client_id() == Some(&candidate) {
            return Ok(Vec::new());
        }

        debug!(removed = %first_removed, candidate = %candidate, "Selecting previous block");
        Ok(vec![EditorEvent::select_block(candidate, Some(Caret::End))])
    }
}
