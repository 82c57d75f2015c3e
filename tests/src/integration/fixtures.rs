//! Shared fixtures for the integration flows.

use std::sync::Arc;
use std::time::Duration;

use bw_04_notices::RecordingAnnouncer;
use effects_runtime::adapters::{InMemoryPostStore, InMemoryReusableBlockStore, RecordingObserver};
use effects_runtime::{Collaborators, EditorRuntime, RuntimeConfig};
use shared_bus::DispatcherConfig;
use shared_types::{Block, DocumentSnapshot};

/// Idle period after which an asynchronous flow is considered settled.
pub const IDLE: Duration = Duration::from_millis(100);

pub fn paragraph(id: &str, content: &str) -> Block {
    Block::with_id(id, "core/paragraph").with_attribute("content", content)
}

/// `root -> [a, b, c]` preceded by a top-level title paragraph.
pub fn nested_document() -> DocumentSnapshot {
    DocumentSnapshot::new(vec![
        paragraph("title", "Title"),
        Block::with_id("root", "core/group").with_inner_blocks(vec![
            paragraph("a", "A"),
            paragraph("b", "B"),
            paragraph("c", "C"),
        ]),
    ])
}

/// Runtime plus handles on every recording collaborator.
pub struct Harness {
    pub runtime: EditorRuntime,
    pub announcer: Arc<RecordingAnnouncer>,
    pub observer: Arc<RecordingObserver>,
    pub posts: Arc<InMemoryPostStore>,
    pub reusable_blocks: Arc<InMemoryReusableBlockStore>,
}

impl Harness {
    /// Strict runtime over `snapshot`.
    pub fn new(snapshot: DocumentSnapshot) -> Self {
        Self::with_stores(
            snapshot,
            InMemoryPostStore::new(),
            InMemoryReusableBlockStore::new(),
        )
    }

    pub fn with_stores(
        snapshot: DocumentSnapshot,
        posts: InMemoryPostStore,
        reusable_blocks: InMemoryReusableBlockStore,
    ) -> Self {
        let announcer = Arc::new(RecordingAnnouncer::new());
        let observer = Arc::new(RecordingObserver::new());
        let posts = Arc::new(posts);
        let reusable_blocks = Arc::new(reusable_blocks);

        let collaborators = Collaborators::in_memory()
            .with_announcer(announcer.clone())
            .with_observer(observer.clone())
            .with_posts(posts.clone())
            .with_reusable_blocks(reusable_blocks.clone());

        let config = RuntimeConfig {
            dispatcher: DispatcherConfig::strict(),
            ..RuntimeConfig::default()
        };
        let runtime = EditorRuntime::with_document(config, &collaborators, snapshot)
            .expect("default configuration is valid");

        Self {
            runtime,
            announcer,
            observer,
            posts,
            reusable_blocks,
        }
    }
}
