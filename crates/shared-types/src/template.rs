//! # Templates
//!
//! A template is an ordered structural expectation for a block list. Each
//! entry names a block type, default attributes for freshly created blocks
//! and the template of its inner blocks.

use crate::entities::Attributes;
use serde::{Deserialize, Serialize};

/// Ordered list of expected block shapes.
pub type Template = Vec<TemplateEntry>;

/// One expected block shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateEntry {
    /// Expected block type name.
    pub name: String,
    /// Attributes used when the block has to be created.
    #[serde(default)]
    pub attributes: Attributes,
    /// Expected inner blocks. Empty means no inner blocks.
    #[serde(default)]
    pub inner: Template,
}

impl TemplateEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            inner: Vec::new(),
        }
    }

    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_inner(mut self, inner: Template) -> Self {
        self.inner = inner;
        self
    }
}

/// How strictly a template must be obeyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateLock {
    /// Template is a default only.
    #[default]
    None,
    /// Blocks may not be inserted or removed, but the template is still advisory.
    Insert,
    /// Structural divergence is forbidden.
    All,
}

impl TemplateLock {
    /// Only `All` makes the template binding.
    #[must_use]
    pub fn is_strict(self) -> bool {
        matches!(self, Self::All)
    }
}
