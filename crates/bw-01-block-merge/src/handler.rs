//! Merge Blocks Handler
//!
//! Resolves `MergeBlocks` events against the current document.

use crate::domain::merge::resolve_merge;
use crate::domain::registry::BlockTypeRegistry;
use shared_bus::{EditorEvent, EffectError, EffectHandler, Effects, EventKind};
use shared_types::DocumentAccessor;
use std::sync::Arc;
use tracing::{debug, info};

/// Handler for `MergeBlocks`.
pub struct MergeBlocksHandler {
    registry: Arc<BlockTypeRegistry>,
}

impl MergeBlocksHandler {
    pub fn new(registry: Arc<BlockTypeRegistry>) -> Self {
        Self { registry }
    }
}

impl EffectHandler for MergeBlocksHandler {
    fn name(&self) -> &'static str {
        "merge-blocks"
    }

    fn handle(
        &self,
        event: &EditorEvent,
        state: &dyn DocumentAccessor,
    ) -> Result<Effects, EffectError> {
        let EditorEvent::MergeBlocks { receiving, donor } = event else {
            return Err(EffectError::UnexpectedEvent {
                handler: self.name(),
                kind: event.kind(),
            });
        };

        if receiving == donor {
            return Err(EffectError::MalformedPayload {
                kind: EventKind::MergeBlocks,
                reason: format!("block {receiving} cannot be merged into itself"),
            });
        }

        let receiving_block = state
            .block(receiving)
            .ok_or_else(|| EffectError::BlockNotFound(receiving.clone()))?;
        let donor_block = state
            .block(donor)
            .ok_or_else(|| EffectError::BlockNotFound(donor.clone()))?;

        let outcome = resolve_merge(&self.registry, receiving_block, donor_block)?;
        debug!(receiving = %receiving, donor = %donor, outcome = ?outcome, "Merge resolved");

        let effects = outcome.into_effects();
        if effects.len() > 1 {
            info!(receiving = %receiving, donor = %donor, "Blocks merged");
        }
        Ok(effects)
    }
}
