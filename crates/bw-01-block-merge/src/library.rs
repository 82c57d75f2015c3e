//! Core block library
//!
//! Block types shipped with the editor and their merge/transform capabilities.

use crate::domain::registry::{BlockTypeDescriptor, BlockTypeRegistry};
use serde_json::Value;
use shared_types::{Attributes, Block};
use tracing::warn;

pub const PARAGRAPH: &str = "core/paragraph";
pub const HEADING: &str = "core/heading";
pub const LIST: &str = "core/list";
pub const QUOTE: &str = "core/quote";
pub const SEPARATOR: &str = "core/separator";
pub const IMAGE: &str = "core/image";
pub const GROUP: &str = "core/group";

/// Registry populated with the core block types.
#[must_use]
pub fn core_block_types() -> BlockTypeRegistry {
    let mut registry = BlockTypeRegistry::new();
    let descriptors = [
        paragraph(),
        heading(),
        list(),
        quote(),
        BlockTypeDescriptor::new(SEPARATOR),
        BlockTypeDescriptor::new(IMAGE),
        BlockTypeDescriptor::new(GROUP),
    ];
    for descriptor in descriptors {
        if let Err(err) = registry.register(descriptor) {
            warn!(error = %err, "Skipping core block type");
        }
    }
    registry
}

fn paragraph() -> BlockTypeDescriptor {
    BlockTypeDescriptor::new(PARAGRAPH)
        .with_merge(concat_text("content"))
        .with_transform_from(HEADING, |block| {
            vec![Block::new(PARAGRAPH, with_content(text(&block.attributes, "content")))]
        })
        // One paragraph per list item.
        .with_transform_from(LIST, |block| {
            list_values(&block.attributes)
                .iter()
                .map(|item| Block::new(PARAGRAPH, with_content(item.as_str().unwrap_or_default())))
                .collect()
        })
        .with_transform_from(QUOTE, |block| {
            let mut blocks = vec![Block::new(
                PARAGRAPH,
                with_content(text(&block.attributes, "value")),
            )];
            let citation = text(&block.attributes, "citation");
            if !citation.is_empty() {
                blocks.push(Block::new(PARAGRAPH, with_content(citation)));
            }
            blocks
        })
}

fn heading() -> BlockTypeDescriptor {
    BlockTypeDescriptor::new(HEADING)
        .with_merge(concat_text("content"))
        .with_transform_from(PARAGRAPH, |block| {
            let mut attributes = with_content(text(&block.attributes, "content"));
            attributes.insert("level".to_string(), Value::from(2));
            vec![Block::new(HEADING, attributes)]
        })
}

fn list() -> BlockTypeDescriptor {
    BlockTypeDescriptor::new(LIST)
        .with_merge(|receiving: &Attributes, donor: &Attributes| {
            let mut values = list_values(receiving).to_vec();
            values.extend(list_values(donor).iter().cloned());
            Attributes::from([("values".to_string(), Value::Array(values))])
        })
        .with_transform_from(PARAGRAPH, |block| {
            let content = text(&block.attributes, "content");
            let attributes =
                Attributes::from([("values".to_string(), Value::Array(vec![Value::from(content)]))]);
            vec![Block::new(LIST, attributes)]
        })
}

fn quote() -> BlockTypeDescriptor {
    BlockTypeDescriptor::new(QUOTE).with_transform_from(PARAGRAPH, |block| {
        let value = text(&block.attributes, "content");
        vec![Block::new(
            QUOTE,
            Attributes::from([("value".to_string(), Value::from(value))]),
        )]
    })
}

/// Merge capability that concatenates the string attribute `key`.
fn concat_text(key: &'static str) -> impl Fn(&Attributes, &Attributes) -> Attributes + Send + Sync {
    move |receiving: &Attributes, donor: &Attributes| {
        let joined = format!("{}{}", text(receiving, key), text(donor, key));
        Attributes::from([(key.to_string(), Value::String(joined))])
    }
}

fn text<'a>(attributes: &'a Attributes, key: &str) -> &'a str {
    attributes
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
}

fn list_values(attributes: &Attributes) -> &[Value] {
    attributes
        .get("values")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn with_content(content: &str) -> Attributes {
    Attributes::from([("content".to_string(), Value::from(content))])
}
