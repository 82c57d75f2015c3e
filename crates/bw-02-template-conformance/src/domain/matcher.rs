//! Structural template matching

use shared_types::{Block, Template, TemplateEntry, TemplateLock};

/// True when `blocks` has exactly the shape of `template`.
///
/// Same length, and at every index the same type name with inner blocks
/// matching the inner template. Attribute values are not compared.
pub fn blocks_match_template(blocks: &[Block], template: &[TemplateEntry]) -> bool {
    blocks.len() == template.len()
        && blocks.iter().zip(template).all(|(block, entry)| {
            block.name == entry.name && blocks_match_template(&block.inner_blocks, &entry.inner)
        })
}

/// Template conformance predicate.
///
/// Unlocked templates act as default values only and are always satisfied.
pub fn conforms(blocks: &[Block], template: Option<&Template>, lock: TemplateLock) -> bool {
    match template {
        None => true,
        Some(_) if !lock.is_strict() => true,
        Some(template) => blocks_match_template(blocks, template),
    }
}
