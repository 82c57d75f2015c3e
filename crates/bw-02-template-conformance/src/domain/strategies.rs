//! Proptest strategies for block lists and templates.

use proptest::prelude::*;
use shared_types::{Attributes, Block, Template, TemplateEntry};

const NAMES: &[&str] = &["core/paragraph", "core/heading", "core/group", "core/column"];

fn arb_name() -> impl Strategy<Value = String> {
    proptest::sample::select(NAMES).prop_map(|name| name.to_string())
}

pub(crate) fn arb_blocks() -> impl Strategy<Value = Vec<Block>> {
    let leaf = arb_name().prop_map(|name| Block::new(name, Attributes::new()));
    let block = leaf.prop_recursive(3, 24, 4, |inner| {
        (arb_name(), prop::collection::vec(inner, 0..4)).prop_map(|(name, children)| {
            Block::new(name, Attributes::new()).with_inner_blocks(children)
        })
    });
    prop::collection::vec(block, 0..5)
}

pub(crate) fn arb_template() -> impl Strategy<Value = Template> {
    let leaf = arb_name().prop_map(|name| TemplateEntry::new(name));
    let entry = leaf.prop_recursive(3, 24, 4, |inner| {
        (arb_name(), prop::collection::vec(inner, 0..4))
            .prop_map(|(name, children)| TemplateEntry::new(name).with_inner(children))
    });
    prop::collection::vec(entry, 0..5)
}
