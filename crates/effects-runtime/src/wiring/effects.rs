//! Default effect table.
//!
//! | Event | Handlers |
//! |-------|----------|
//! | `RequestPostUpdate`, `TrashPost`, `RefreshPost` | post routing |
//! | post outcomes | persistence observers |
//! | `MergeBlocks` | block merge |
//! | `ResetBlocks` | template validation |
//! | `SynchronizeTemplate` | template synchronization |
//! | `CheckTemplateValidity` | template validity check |
//! | `FetchReusableBlocks`, `SaveReusableBlock`, `DeleteReusableBlock` | reusable block routing |
//! | reusable block outcomes, conversions | persistence observers |
//! | `CreateNotice` | announcer |
//! | `RemoveBlocks` | selection recovery |

use std::sync::Arc;

use bw_01_block_merge::{core_block_types, BlockTypeRegistry, MergeBlocksHandler};
use bw_02_template_conformance::{
    CheckTemplateValidityHandler, SynchronizeTemplateHandler, ValidateBlocksToTemplateHandler,
};
use bw_03_selection_recovery::RemoveBlocksHandler;
use bw_04_notices::{Announcer, CreateNoticeHandler, TracingAnnouncer};
use shared_bus::{DispatcherConfig, EffectDispatcher, EffectHandler, EventKind};
use tracing::info;

use crate::adapters::{InMemoryPostStore, InMemoryReusableBlockStore, NoticeObserver, TracingObserver};
use crate::handlers::{
    ObserverHandler, PostRequestHandler, ReusableBlockRequestHandler, OBSERVED_KINDS,
    POST_REQUEST_KINDS, REUSABLE_BLOCK_REQUEST_KINDS,
};
use crate::ports::{PersistenceObserver, PostPersistence, ReusableBlockPersistence};

/// Everything the effect handlers depend on outside the document.
#[derive(Clone)]
pub struct Collaborators {
    pub block_types: Arc<BlockTypeRegistry>,
    pub announcer: Arc<dyn Announcer>,
    pub posts: Arc<dyn PostPersistence>,
    pub reusable_blocks: Arc<dyn ReusableBlockPersistence>,
    /// Receive persistence outcomes, in this order.
    pub observers: Vec<Arc<dyn PersistenceObserver>>,
    /// Also turn post outcomes into notices posted back through the inbox.
    pub post_notices: bool,
}

impl Collaborators {
    /// Core block types, log-backed announcer and observer, empty in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            block_types: Arc::new(core_block_types()),
            announcer: Arc::new(TracingAnnouncer),
            posts: Arc::new(InMemoryPostStore::new()),
            reusable_blocks: Arc::new(InMemoryReusableBlockStore::new()),
            observers: vec![Arc::new(TracingObserver)],
            post_notices: true,
        }
    }

    pub fn with_announcer(mut self, announcer: Arc<dyn Announcer>) -> Self {
        self.announcer = announcer;
        self
    }

    pub fn with_posts(mut self, posts: Arc<dyn PostPersistence>) -> Self {
        self.posts = posts;
        self
    }

    pub fn with_reusable_blocks(mut self, store: Arc<dyn ReusableBlockPersistence>) -> Self {
        self.reusable_blocks = store;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn PersistenceObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn with_post_notices(mut self, enabled: bool) -> Self {
        self.post_notices = enabled;
        self
    }
}

impl Default for Collaborators {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// Register every effect handler on `dispatcher`.
pub fn register_effects(dispatcher: &mut EffectDispatcher, collaborators: &Collaborators) {
    let sender = dispatcher.event_sender();

    let post_requests = PostRequestHandler::new(Arc::clone(&collaborators.posts), sender.clone());
    for kind in POST_REQUEST_KINDS {
        dispatcher.register(kind, post_requests.clone());
    }

    let mut observers: Vec<Arc<dyn EffectHandler>> = collaborators
        .observers
        .iter()
        .map(|observer| Arc::new(ObserverHandler::new(Arc::clone(observer))) as Arc<dyn EffectHandler>)
        .collect();
    if collaborators.post_notices {
        observers.push(Arc::new(ObserverHandler::new(Arc::new(NoticeObserver::new(
            sender.clone(),
        )))));
    }

    // Each kind owns its handler set, so only the order within a kind matters.
    for kind in OBSERVED_KINDS {
        dispatcher.register(kind, observers.clone());
    }

    dispatcher
        .register(
            EventKind::MergeBlocks,
            MergeBlocksHandler::new(Arc::clone(&collaborators.block_types)),
        )
        .register(EventKind::ResetBlocks, ValidateBlocksToTemplateHandler)
        .register(EventKind::SynchronizeTemplate, SynchronizeTemplateHandler)
        .register(EventKind::CheckTemplateValidity, CheckTemplateValidityHandler);

    let reusable_requests =
        ReusableBlockRequestHandler::new(Arc::clone(&collaborators.reusable_blocks), sender);
    for kind in REUSABLE_BLOCK_REQUEST_KINDS {
        dispatcher.register(kind, reusable_requests.clone());
    }

    dispatcher
        .register(
            EventKind::CreateNotice,
            CreateNoticeHandler::new(Arc::clone(&collaborators.announcer)),
        )
        .register(EventKind::RemoveBlocks, RemoveBlocksHandler);

    info!(
        kinds = dispatcher.registered_kinds().len(),
        observers = observers.len(),
        "Effect handlers registered"
    );
}

/// Dispatcher with the full default effect table.
pub fn build_dispatcher(config: DispatcherConfig, collaborators: &Collaborators) -> EffectDispatcher {
    let mut dispatcher = EffectDispatcher::with_config(config);
    register_effects(&mut dispatcher, collaborators);
    dispatcher
}
