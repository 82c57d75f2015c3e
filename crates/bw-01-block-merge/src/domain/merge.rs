//! Merge resolution
//!
//! Computes what merging a donor block into a receiving block produces.

use super::registry::BlockTypeRegistry;
use super::switch::switch_to_block_type;
use shared_bus::{EditorEvent, EffectError, Effects};
use shared_types::{Block, Caret, ClientId};
use std::borrow::Cow;
use tracing::debug;

/// Result of resolving a merge.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome {
    /// Receiving type cannot merge: focus moves to the receiving block only.
    FocusOnly { receiving: ClientId },
    /// Donor cannot be converted into the receiving type. Nothing happens.
    Incompatible,
    /// Donor merged into the receiver.
    Merged {
        receiving: ClientId,
        donor: ClientId,
        /// Merged receiver first, then any extra converted blocks.
        blocks: Vec<Block>,
    },
}

impl MergeOutcome {
    /// Follow-up events for this outcome.
    #[must_use]
    pub fn into_effects(self) -> Effects {
        match self {
            Self::FocusOnly { receiving } => vec![EditorEvent::select_block(receiving, None)],
            Self::Incompatible => Vec::new(),
            Self::Merged {
                receiving,
                donor,
                blocks,
            } => vec![
                EditorEvent::select_block(receiving.clone(), Some(Caret::End)),
                EditorEvent::replace_blocks(vec![receiving, donor], blocks),
            ],
        }
    }
}

/// Merge `donor` into `receiving`.
///
/// Fails only when the receiving block's type is not registered.
pub fn resolve_merge(
    registry: &BlockTypeRegistry,
    receiving: &Block,
    donor: &Block,
) -> Result<MergeOutcome, EffectError> {
    let block_type = registry
        .lookup(&receiving.name)
        .ok_or_else(|| EffectError::UnknownBlockType(receiving.name.clone()))?;

    let Some(merge) = block_type.merge() else {
        debug!(block_type = %receiving.name, "Block type is not mergeable, focusing receiver");
        return Ok(MergeOutcome::FocusOnly {
            receiving: receiving.client_id.clone(),
        });
    };

    let candidates: Cow<'_, [Block]> = if receiving.name == donor.name {
        Cow::Borrowed(std::slice::from_ref(donor))
    } else {
        Cow::Owned(switch_to_block_type(registry, donor, &receiving.name))
    };

    let Some((first, rest)) = candidates.split_first() else {
        debug!(
            receiving_type = %receiving.name,
            donor_type = %donor.name,
            "Donor cannot be converted, merge skipped"
        );
        return Ok(MergeOutcome::Incompatible);
    };

    let mut merged = receiving.clone();
    merged
        .attributes
        .extend(merge(&receiving.attributes, &first.attributes));

    let mut blocks = Vec::with_capacity(candidates.len());
    blocks.push(merged);
    blocks.extend(rest.iter().cloned());

    Ok(MergeOutcome::Merged {
        receiving: receiving.client_id.clone(),
        donor: donor.client_id.clone(),
        blocks,
    })
}
