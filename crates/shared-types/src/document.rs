//! # Document State
//!
//! Snapshots, history and the read-only accessor port.
//!
//! The document container owns the live state. Effect subsystems see it only
//! through [`DocumentAccessor`], and see the past only through the most recent
//! [`History`] entry.

use crate::entities::{Block, BlockTree, ClientId};
use crate::template::{Template, TemplateLock};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;

/// Caret placement inside a selected block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Caret {
    /// Before the first piece of content.
    Start,
    /// At a concrete offset.
    Offset(usize),
    /// After the last piece of content, whatever its length.
    End,
}

/// Current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub client_id: Option<ClientId>,
    pub caret: Option<Caret>,
}

impl Selection {
    pub fn block(client_id: impl Into<ClientId>) -> Self {
        Self {
            client_id: Some(client_id.into()),
            caret: None,
        }
    }
}

/// Full document state at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentSnapshot {
    pub blocks: BlockTree,
    pub template: Option<Template>,
    pub template_lock: TemplateLock,
    /// Last computed template conformance.
    pub template_valid: bool,
    pub selection: Selection,
}

impl Default for DocumentSnapshot {
    fn default() -> Self {
        Self {
            blocks: BlockTree::default(),
            template: None,
            template_lock: TemplateLock::None,
            template_valid: true,
            selection: Selection::default(),
        }
    }
}

impl DocumentSnapshot {
    pub fn new(blocks: impl Into<BlockTree>) -> Self {
        Self {
            blocks: blocks.into(),
            ..Self::default()
        }
    }

    pub fn with_template(mut self, template: Template, lock: TemplateLock) -> Self {
        self.template = Some(template);
        self.template_lock = lock;
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }
}

/// Past stack of snapshots, oldest first.
///
/// Bounded: once `limit` is reached the oldest entry is dropped.
#[derive(Debug, Clone)]
pub struct History {
    past: VecDeque<Arc<DocumentSnapshot>>,
    limit: usize,
}

impl History {
    /// Default number of retained snapshots.
    pub const DEFAULT_LIMIT: usize = 100;

    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            past: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Append a snapshot as the most recent entry.
    pub fn push(&mut self, snapshot: DocumentSnapshot) {
        if self.past.len() == self.limit {
            self.past.pop_front();
        }
        self.past.push_back(Arc::new(snapshot));
    }

    /// Most recent past snapshot.
    #[must_use]
    pub fn latest(&self) -> Option<&DocumentSnapshot> {
        self.past.back().map(Arc::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.past.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.past.is_empty()
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Snapshots from oldest to most recent.
    pub fn iter(&self) -> impl Iterator<Item = &DocumentSnapshot> {
        self.past.iter().map(Arc::as_ref)
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT)
    }
}

/// Read-only view of document state consumed by effect handlers.
pub trait DocumentAccessor {
    /// Top-level block tree.
    fn blocks(&self) -> &BlockTree;

    /// Currently selected block.
    fn selected_block_client_id(&self) -> Option<&ClientId>;

    fn template(&self) -> Option<&Template>;

    fn template_lock(&self) -> TemplateLock;

    /// Stored conformance result.
    fn is_template_valid(&self) -> bool;

    /// Most recent snapshot of the past stack.
    fn previous_snapshot(&self) -> Option<&DocumentSnapshot>;

    fn block(&self, id: &ClientId) -> Option<&Block> {
        self.blocks().block(id)
    }

    fn block_root_client_id(&self, id: &ClientId) -> Option<&ClientId> {
        self.blocks().root_client_id(id)
    }

    fn previous_block_client_id(&self, id: &ClientId) -> Option<&ClientId> {
        self.blocks().previous_sibling(id)
    }
}

/// A snapshot reads like a document with no past of its own.
impl DocumentAccessor for DocumentSnapshot {
    fn blocks(&self) -> &BlockTree {
        &self.blocks
    }

    fn selected_block_client_id(&self) -> Option<&ClientId> {
        self.selection.client_id.as_ref()
    }

    fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    fn template_lock(&self) -> TemplateLock {
        self.template_lock
    }

    fn is_template_valid(&self) -> bool {
        self.template_valid
    }

    fn previous_snapshot(&self) -> Option<&DocumentSnapshot> {
        None
    }
}
