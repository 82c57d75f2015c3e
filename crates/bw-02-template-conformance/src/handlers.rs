//! Template effect handlers

use crate::domain::matcher::conforms;
use crate::domain::synchronize::synchronize_blocks_with_template;
use shared_bus::{EditorEvent, EffectError, EffectHandler, Effects};
use shared_types::DocumentAccessor;
use tracing::{debug, info};

/// On `ResetBlocks`: store the new validity only when it changed.
#[derive(Debug, Default, Clone, Copy)]
pub struct ValidateBlocksToTemplateHandler;

impl EffectHandler for ValidateBlocksToTemplateHandler {
    fn name(&self) -> &'static str {
        "validate-blocks-to-template"
    }

    fn handle(
        &self,
        event: &EditorEvent,
        state: &dyn DocumentAccessor,
    ) -> Result<Effects, EffectError> {
        let EditorEvent::ResetBlocks { blocks } = event else {
            return Err(EffectError::UnexpectedEvent {
                handler: self.name(),
                kind: event.kind(),
            });
        };

        let is_valid = conforms(blocks, state.template(), state.template_lock());
        if is_valid == state.is_template_valid() {
            return Ok(Vec::new());
        }

        debug!(is_valid, "Template validity changed");
        Ok(vec![EditorEvent::set_template_validity(is_valid)])
    }
}

/// On `CheckTemplateValidity`: always store the recomputed validity.
#[derive(Debug, Default, Clone, Copy)]
pub struct CheckTemplateValidityHandler;

impl EffectHandler for CheckTemplateValidityHandler {
    fn name(&self) -> &'static str {
        "check-template-validity"
    }

    fn handle(
        &self,
        event: &EditorEvent,
        state: &dyn DocumentAccessor,
    ) -> Result<Effects, EffectError> {
        if !matches!(event, EditorEvent::CheckTemplateValidity) {
            return Err(EffectError::UnexpectedEvent {
                handler: self.name(),
                kind: event.kind(),
            });
        }

        let is_valid = conforms(
            state.blocks().blocks(),
            state.template(),
            state.template_lock(),
        );
        Ok(vec![EditorEvent::set_template_validity(is_valid)])
    }
}

/// On `SynchronizeTemplate`: force the block list to follow the template.
#[derive(Debug, Default, Clone, Copy)]
pub struct SynchronizeTemplateHandler;

impl EffectHandler for SynchronizeTemplateHandler {
    fn name(&self) -> &'static str {
        "synchronize-template"
    }

    fn handle(
        &self,
        event: &EditorEvent,
        state: &dyn DocumentAccessor,
    ) -> Result<Effects, EffectError> {
        if !matches!(event, EditorEvent::SynchronizeTemplate) {
            return Err(EffectError::UnexpectedEvent {
                handler: self.name(),
                kind: event.kind(),
            });
        }

        let Some(template) = state.template() else {
            debug!("No template set, synchronization skipped");
            return Ok(Vec::new());
        };

        let blocks = synchronize_blocks_with_template(state.blocks().blocks(), template);
        info!(blocks = blocks.len(), "Block list synchronized with template");

        Ok(vec![
            EditorEvent::reset_blocks(blocks),
            EditorEvent::set_template_validity(true),
        ])
    }
}
