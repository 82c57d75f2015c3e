//! # Replay Sessions
//!
//! A session file seeds the document and the in-memory collaborators, then
//! lists the events to dispatch in order.
//!
//! ```json
//! {
//!   "document": { "blocks": [ ... ], "template": [ ... ], "templateLock": "all" },
//!   "posts": { "1": { "title": "Hello" } },
//!   "reusableBlocks": [ { "id": 4, "title": "Footer", "content": [] } ],
//!   "events": [ { "kind": "MERGE_BLOCKS", "receiving": "a", "donor": "b" } ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_bus::{EditorEvent, ReusableBlock};
use shared_types::DocumentSnapshot;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::adapters::{InMemoryPostStore, InMemoryReusableBlockStore};
use crate::wiring::Collaborators;

/// Initial state plus the events to replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    pub document: DocumentSnapshot,
    pub posts: BTreeMap<u64, Value>,
    pub reusable_blocks: Vec<ReusableBlock>,
    pub events: Vec<EditorEvent>,
}

impl Session {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// In-memory collaborators seeded with the session's posts and reusable blocks.
    pub fn collaborators(&self) -> Collaborators {
        let posts = self
            .posts
            .iter()
            .fold(InMemoryPostStore::new(), |store, (id, post)| store.with_post(*id, post.clone()));
        let reusable_blocks = self
            .reusable_blocks
            .iter()
            .cloned()
            .fold(InMemoryReusableBlockStore::new(), InMemoryReusableBlockStore::with_block);

        Collaborators::in_memory()
            .with_posts(Arc::new(posts))
            .with_reusable_blocks(Arc::new(reusable_blocks))
    }
}
