//! # In-Memory Persistence Collaborators
//!
//! Post and reusable block stores that live in process memory. They back the
//! replay binary and the integration tests, and can be switched into an
//! outage to exercise failure routing.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use shared_bus::{ReusableBlock, ReusableBlockId};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

use crate::ports::{PersistenceError, PostPersistence, PostUpdate, ReusableBlockPersistence};

// =============================================================================
// Posts
// =============================================================================

#[derive(Debug, Default)]
struct PostState {
    posts: BTreeMap<u64, Value>,
    autosaves: BTreeMap<u64, Value>,
    trashed: BTreeSet<u64>,
    outage: Option<String>,
}

/// Post storage. Autosaves are kept apart from the post they belong to.
#[derive(Debug, Default)]
pub struct InMemoryPostStore {
    state: Mutex<PostState>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_post(self, post_id: u64, post: Value) -> Self {
        self.insert_post(post_id, post);
        self
    }

    pub fn insert_post(&self, post_id: u64, post: Value) {
        self.state.lock().posts.insert(post_id, post);
    }

    /// Stored post, without pending autosaves.
    pub fn post(&self, post_id: u64) -> Option<Value> {
        self.state.lock().posts.get(&post_id).cloned()
    }

    pub fn autosave(&self, post_id: u64) -> Option<Value> {
        self.state.lock().autosaves.get(&post_id).cloned()
    }

    pub fn is_trashed(&self, post_id: u64) -> bool {
        self.state.lock().trashed.contains(&post_id)
    }

    /// Fail every call with `Unavailable(reason)` until cleared with `None`.
    pub fn set_outage(&self, reason: Option<String>) {
        self.state.lock().outage = reason;
    }

    fn check_available(state: &PostState) -> Result<(), PersistenceError> {
        match &state.outage {
            Some(reason) => Err(PersistenceError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PostPersistence for InMemoryPostStore {
    async fn update_post(
        &self,
        post_id: u64,
        edits: &Value,
        is_autosave: bool,
    ) -> Result<PostUpdate, PersistenceError> {
        let mut state = self.state.lock();
        Self::check_available(&state)?;

        if state.trashed.contains(&post_id) {
            return Err(PersistenceError::Conflict(format!("post {post_id} is trashed")));
        }
        let previous = state
            .posts
            .get(&post_id)
            .cloned()
            .ok_or(PersistenceError::NotFound {
                resource: "post",
                id: post_id,
            })?;

        let base = if is_autosave {
            state.autosaves.get(&post_id).cloned().unwrap_or_else(|| previous.clone())
        } else {
            previous.clone()
        };
        let current = apply_edits(base, edits);

        if is_autosave {
            state.autosaves.insert(post_id, current.clone());
        } else {
            state.autosaves.remove(&post_id);
            state.posts.insert(post_id, current.clone());
        }
        debug!(post_id, is_autosave, "Post updated");

        Ok(PostUpdate { previous, current })
    }

    async fn trash_post(&self, post_id: u64, post_type: &str) -> Result<(), PersistenceError> {
        let mut state = self.state.lock();
        Self::check_available(&state)?;

        if !state.posts.contains_key(&post_id) {
            return Err(PersistenceError::NotFound {
                resource: "post",
                id: post_id,
            });
        }
        state.trashed.insert(post_id);
        debug!(post_id, post_type, "Post trashed");
        Ok(())
    }

    async fn refresh_post(&self, post_id: u64, post_type: &str) -> Result<Value, PersistenceError> {
        let state = self.state.lock();
        Self::check_available(&state)?;
        trace!(post_id, post_type, "Post refreshed");
        state
            .posts
            .get(&post_id)
            .cloned()
            .ok_or(PersistenceError::NotFound {
                resource: "post",
                id: post_id,
            })
    }
}

/// Shallow merge of an edits object into a post object.
fn apply_edits(mut post: Value, edits: &Value) -> Value {
    match (post.as_object_mut(), edits.as_object()) {
        (Some(fields), Some(changes)) => {
            for (key, value) in changes {
                fields.insert(key.clone(), value.clone());
            }
            post
        }
        _ => edits.clone(),
    }
}

// =============================================================================
// Reusable blocks
// =============================================================================

#[derive(Debug, Default)]
struct ReusableState {
    blocks: BTreeMap<ReusableBlockId, ReusableBlock>,
    /// Created locally, not yet saved.
    drafts: BTreeSet<ReusableBlockId>,
    outage: Option<String>,
}

/// Reusable block storage with server-assigned ids on first save.
#[derive(Debug, Default)]
pub struct InMemoryReusableBlockStore {
    state: Mutex<ReusableState>,
}

impl InMemoryReusableBlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an already persisted block.
    pub fn with_block(self, block: ReusableBlock) -> Self {
        self.state.lock().blocks.insert(block.id, block);
        self
    }

    /// Add a block that exists only locally until saved.
    pub fn insert_draft(&self, block: ReusableBlock) {
        let mut state = self.state.lock();
        state.drafts.insert(block.id);
        state.blocks.insert(block.id, block);
    }

    pub fn block(&self, id: ReusableBlockId) -> Option<ReusableBlock> {
        self.state.lock().blocks.get(&id).cloned()
    }

    pub fn is_draft(&self, id: ReusableBlockId) -> bool {
        self.state.lock().drafts.contains(&id)
    }

    pub fn set_outage(&self, reason: Option<String>) {
        self.state.lock().outage = reason;
    }

    fn check_available(state: &ReusableState) -> Result<(), PersistenceError> {
        match &state.outage {
            Some(reason) => Err(PersistenceError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }

    fn not_found(id: ReusableBlockId) -> PersistenceError {
        PersistenceError::NotFound {
            resource: "reusable block",
            id,
        }
    }
}

#[async_trait]
impl ReusableBlockPersistence for InMemoryReusableBlockStore {
    async fn fetch(
        &self,
        id: Option<ReusableBlockId>,
    ) -> Result<Vec<ReusableBlock>, PersistenceError> {
        let state = self.state.lock();
        Self::check_available(&state)?;

        match id {
            Some(id) if state.drafts.contains(&id) => Err(Self::not_found(id)),
            Some(id) => state
                .blocks
                .get(&id)
                .map(|block| vec![block.clone()])
                .ok_or_else(|| Self::not_found(id)),
            None => Ok(state
                .blocks
                .values()
                .filter(|block| !state.drafts.contains(&block.id))
                .cloned()
                .collect()),
        }
    }

    async fn save(&self, id: ReusableBlockId) -> Result<ReusableBlockId, PersistenceError> {
        let mut state = self.state.lock();
        Self::check_available(&state)?;

        if !state.drafts.remove(&id) {
            return if state.blocks.contains_key(&id) {
                Ok(id)
            } else {
                Err(Self::not_found(id))
            };
        }

        let updated_id = state.blocks.keys().next_back().map_or(1, |last| last + 1);
        let mut block = state.blocks.remove(&id).ok_or_else(|| Self::not_found(id))?;
        block.id = updated_id;
        state.blocks.insert(updated_id, block);
        debug!(id, updated_id, "Reusable block persisted");
        Ok(updated_id)
    }

    async fn delete(&self, id: ReusableBlockId) -> Result<(), PersistenceError> {
        let mut state = self.state.lock();
        Self::check_available(&state)?;

        state.blocks.remove(&id).ok_or_else(|| Self::not_found(id))?;
        state.drafts.remove(&id);
        Ok(())
    }
}
