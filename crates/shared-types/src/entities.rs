//! # Core Domain Entities
//!
//! Blocks and the block tree they form.
//!
//! A block's identity is its `ClientId`; its content is its attributes plus
//! its inner blocks. `ClientId`s are unique within a document.

use crate::errors::DocumentError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Attribute map of a block. Keys are unique and iterate in order.
pub type Attributes = BTreeMap<String, serde_json::Value>;

/// Unique identifier of a block within a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh, random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClientId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ClientId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A node of the document content tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Identity of the block.
    pub client_id: ClientId,
    /// Block type name (e.g. `core/paragraph`).
    pub name: String,
    /// Type-specific attributes.
    #[serde(default)]
    pub attributes: Attributes,
    /// Ordered child blocks.
    #[serde(default)]
    pub inner_blocks: Vec<Block>,
}

impl Block {
    /// Create a block of `name` with a freshly generated client id.
    pub fn new(name: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            client_id: ClientId::generate(),
            name: name.into(),
            attributes,
            inner_blocks: Vec::new(),
        }
    }

    /// Create an empty block with a known client id.
    pub fn with_id(client_id: impl Into<ClientId>, name: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            name: name.into(),
            attributes: Attributes::new(),
            inner_blocks: Vec::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_inner_blocks(mut self, inner_blocks: Vec<Block>) -> Self {
        self.inner_blocks = inner_blocks;
        self
    }

    /// Look up a single attribute.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&serde_json::Value> {
        self.attributes.get(key)
    }
}

/// Position of a block inside the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLocation {
    /// Parent container; `None` for top-level blocks.
    pub parent: Option<ClientId>,
    /// Index among the parent's children.
    pub index: usize,
}

/// Ordered top-level block list of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockTree {
    blocks: Vec<Block>,
}

impl BlockTree {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[must_use]
    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    /// Number of top-level blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Find a block anywhere in the tree.
    #[must_use]
    pub fn block(&self, id: &ClientId) -> Option<&Block> {
        find(&self.blocks, id)
    }

    #[must_use]
    pub fn contains(&self, id: &ClientId) -> bool {
        self.block(id).is_some()
    }

    /// Parent and index of a block.
    #[must_use]
    pub fn locate(&self, id: &ClientId) -> Option<BlockLocation> {
        locate_in(&self.blocks, None, id)
    }

    /// Parent container of a block. `None` for top-level or unknown blocks.
    #[must_use]
    pub fn root_client_id(&self, id: &ClientId) -> Option<&ClientId> {
        let parent = self.locate(id)?.parent?;
        self.block(&parent).map(|block| &block.client_id)
    }

    /// Sibling immediately preceding a block, if any.
    #[must_use]
    pub fn previous_sibling(&self, id: &ClientId) -> Option<&ClientId> {
        let location = self.locate(id)?;
        let index = location.index.checked_sub(1)?;
        self.children_of(location.parent.as_ref())?
            .get(index)
            .map(|block| &block.client_id)
    }

    /// Children of `parent`, or the top-level list for `None`.
    #[must_use]
    pub fn children_of(&self, parent: Option<&ClientId>) -> Option<&[Block]> {
        match parent {
            None => Some(&self.blocks),
            Some(id) => self.block(id).map(|block| block.inner_blocks.as_slice()),
        }
    }

    /// All client ids in depth-first order.
    #[must_use]
    pub fn client_ids(&self) -> Vec<ClientId> {
        let mut ids = Vec::new();
        collect_ids(&self.blocks, &mut ids);
        ids
    }

    /// Remove the given blocks (with their subtrees). Returns how many were removed.
    pub fn remove(&mut self, ids: &[ClientId]) -> usize {
        let ids: HashSet<&ClientId> = ids.iter().collect();
        remove_in(&mut self.blocks, &ids)
    }

    /// Replace `ids` with `replacement`.
    ///
    /// The replacement is inserted where the first id sits; remaining ids are
    /// removed unless the replacement carries them.
    pub fn replace(&mut self, ids: &[ClientId], replacement: Vec<Block>) -> Result<(), DocumentError> {
        let first = ids.first().ok_or(DocumentError::EmptyReplacement)?;
        let location = self
            .locate(first)
            .ok_or_else(|| DocumentError::BlockNotFound(first.clone()))?;

        let kept: HashSet<ClientId> = replacement
            .iter()
            .map(|block| block.client_id.clone())
            .collect();

        let siblings = self
            .children_of_mut(location.parent.as_ref())
            .ok_or_else(|| DocumentError::BlockNotFound(first.clone()))?;
        siblings.splice(location.index..=location.index, replacement);

        let stale: Vec<ClientId> = ids[1..]
            .iter()
            .filter(|id| !kept.contains(*id))
            .cloned()
            .collect();
        self.remove(&stale);

        Ok(())
    }

    fn children_of_mut(&mut self, parent: Option<&ClientId>) -> Option<&mut Vec<Block>> {
        match parent {
            None => Some(&mut self.blocks),
            Some(id) => find_mut(&mut self.blocks, id).map(|block| &mut block.inner_blocks),
        }
    }
}

impl From<Vec<Block>> for BlockTree {
    fn from(blocks: Vec<Block>) -> Self {
        Self::new(blocks)
    }
}

fn find<'a>(blocks: &'a [Block], id: &ClientId) -> Option<&'a Block> {
    for block in blocks {
        if &block.client_id == id {
            return Some(block);
        }
        if let Some(found) = find(&block.inner_blocks, id) {
            return Some(found);
        }
    }
    None
}

fn find_mut<'a>(blocks: &'a mut [Block], id: &ClientId) -> Option<&'a mut Block> {
    for block in blocks.iter_mut() {
        if &block.client_id == id {
            return Some(block);
        }
        if let Some(found) = find_mut(&mut block.inner_blocks, id) {
            return Some(found);
        }
    }
    None
}

fn locate_in(blocks: &[Block], parent: Option<&ClientId>, id: &ClientId) -> Option<BlockLocation> {
    for (index, block) in blocks.iter().enumerate() {
        if &block.client_id == id {
            return Some(BlockLocation {
                parent: parent.cloned(),
                index,
            });
        }
        if let Some(found) = locate_in(&block.inner_blocks, Some(&block.client_id), id) {
            return Some(found);
        }
    }
    None
}

fn collect_ids(blocks: &[Block], ids: &mut Vec<ClientId>) {
    for block in blocks {
        ids.push(block.client_id.clone());
        collect_ids(&block.inner_blocks, ids);
    }
}

fn remove_in(blocks: &mut Vec<Block>, ids: &HashSet<&ClientId>) -> usize {
    let before = blocks.len();
    blocks.retain(|block| !ids.contains(&block.client_id));
    let mut removed = before - blocks.len();
    for block in blocks.iter_mut() {
        removed += remove_in(&mut block.inner_blocks, ids);
    }
    removed
}
