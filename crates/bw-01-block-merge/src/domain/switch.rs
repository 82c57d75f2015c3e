//! Block switching
//!
//! Converts a block into another type through the target type's transforms.

use super::registry::BlockTypeRegistry;
use shared_types::Block;
use tracing::debug;

/// Convert `block` into blocks of type `target`.
///
/// An empty result means "not convertible". A transform result is rejected
/// when none of the produced blocks has the target type, or when any of them
/// has an unregistered type.
pub fn switch_to_block_type(registry: &BlockTypeRegistry, block: &Block, target: &str) -> Vec<Block> {
    let Some(descriptor) = registry.lookup(target) else {
        return Vec::new();
    };
    let Some(transform) = descriptor.transform_from(&block.name) else {
        debug!(from = %block.name, to = target, "No transform between block types");
        return Vec::new();
    };

    let blocks = transform(block);

    if !blocks.iter().any(|candidate| candidate.name == target) {
        debug!(from = %block.name, to = target, "Transform produced no block of the target type");
        return Vec::new();
    }
    if let Some(unknown) = blocks.iter().find(|candidate| !registry.contains(&candidate.name)) {
        debug!(block_type = %unknown.name, "Transform produced an unregistered block type");
        return Vec::new();
    }

    blocks
}
