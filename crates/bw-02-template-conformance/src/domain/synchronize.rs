//! Forced template synchronization

use shared_types::{Block, TemplateEntry};

/// Rebuild `blocks` so they follow `template` exactly.
///
/// Positional reconciliation: where the block at an index already has the
/// entry's type it is kept (identity and attributes untouched) and its inner
/// blocks are synchronized recursively. Otherwise a fresh block is created
/// from the entry. Blocks past the end of the template are dropped.
pub fn synchronize_blocks_with_template(blocks: &[Block], template: &[TemplateEntry]) -> Vec<Block> {
    template
        .iter()
        .enumerate()
        .map(|(index, entry)| match blocks.get(index) {
            Some(block) if block.name == entry.name => Block {
                inner_blocks: synchronize_blocks_with_template(&block.inner_blocks, &entry.inner),
                ..block.clone()
            },
            _ => create_from_entry(entry),
        })
        .collect()
}

fn create_from_entry(entry: &TemplateEntry) -> Block {
    Block::new(entry.name.clone(), entry.attributes.clone())
        .with_inner_blocks(synchronize_blocks_with_template(&[], &entry.inner))
}
