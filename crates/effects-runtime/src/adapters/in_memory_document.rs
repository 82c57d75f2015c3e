//! # In-Memory Document Container
//!
//! Live document state plus its past stack. Every structural change pushes
//! the state it replaces onto the history first, so effects can read the
//! document as it was right before the change.

use shared_bus::{DocumentStore, EditorEvent};
use shared_types::{
    BlockTree, ClientId, DocumentAccessor, DocumentError, DocumentSnapshot, History, Selection,
    Template, TemplateLock,
};
use tracing::{debug, trace};

use crate::container::config::DocumentConfig;

/// Document container backed by plain memory.
#[derive(Debug, Clone)]
pub struct InMemoryDocument {
    present: DocumentSnapshot,
    history: History,
}

impl InMemoryDocument {
    pub fn new(config: &DocumentConfig) -> Self {
        Self::with_snapshot(DocumentSnapshot::default(), config)
    }

    /// Start from `snapshot` with an empty past.
    pub fn with_snapshot(snapshot: DocumentSnapshot, config: &DocumentConfig) -> Self {
        Self {
            present: snapshot,
            history: History::new(config.history_limit),
        }
    }

    /// Current state.
    #[must_use]
    pub fn present(&self) -> &DocumentSnapshot {
        &self.present
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selection(&self) -> &Selection {
        &self.present.selection
    }

    /// Replace the block tree, keeping the old state in history.
    fn commit_blocks(&mut self, blocks: BlockTree) {
        self.history.push(self.present.clone());
        self.present.blocks = blocks;

        let selection_gone = self
            .present
            .selection
            .client_id
            .as_ref()
            .is_some_and(|id| !self.present.blocks.contains(id));
        if selection_gone {
            trace!("Selected block removed, selection cleared");
            self.present.selection = Selection::default();
        }

        debug!(
            blocks = self.present.blocks.len(),
            history = self.history.len(),
            "Block list committed"
        );
    }
}

impl Default for InMemoryDocument {
    fn default() -> Self {
        Self::new(&DocumentConfig::default())
    }
}

impl DocumentAccessor for InMemoryDocument {
    fn blocks(&self) -> &BlockTree {
        &self.present.blocks
    }

    fn selected_block_client_id(&self) -> Option<&ClientId> {
        self.present.selection.client_id.as_ref()
    }

    fn template(&self) -> Option<&Template> {
        self.present.template.as_ref()
    }

    fn template_lock(&self) -> TemplateLock {
        self.present.template_lock
    }

    fn is_template_valid(&self) -> bool {
        self.present.template_valid
    }

    fn previous_snapshot(&self) -> Option<&DocumentSnapshot> {
        self.history.latest()
    }
}

impl DocumentStore for InMemoryDocument {
    fn apply(&mut self, event: &EditorEvent) -> Result<(), DocumentError> {
        match event {
            EditorEvent::ResetBlocks { blocks } => {
                self.commit_blocks(BlockTree::new(blocks.clone()));
            }
            EditorEvent::ReplaceBlocks { client_ids, blocks } => {
                let mut next = self.present.blocks.clone();
                next.replace(client_ids, blocks.clone())?;
                self.commit_blocks(next);
            }
            EditorEvent::RemoveBlocks { client_ids, .. } => {
                if let Some(missing) = client_ids
                    .iter()
                    .find(|id| !self.present.blocks.contains(id))
                {
                    return Err(DocumentError::BlockNotFound(missing.clone()));
                }
                let mut next = self.present.blocks.clone();
                next.remove(client_ids);
                self.commit_blocks(next);
            }
            EditorEvent::SelectBlock {
                client_id,
                initial_position,
            } => {
                if !self.present.blocks.contains(client_id) {
                    return Err(DocumentError::BlockNotFound(client_id.clone()));
                }
                self.present.selection = Selection {
                    client_id: Some(client_id.clone()),
                    caret: *initial_position,
                };
            }
            EditorEvent::SetTemplateValidity { is_valid } => {
                self.present.template_valid = *is_valid;
            }
            EditorEvent::UpdateTemplate { template, lock } => {
                self.present.template = template.clone();
                self.present.template_lock = *lock;
            }
            _ => {}
        }
        Ok(())
    }
}
