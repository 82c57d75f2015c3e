//! # Persistence Routing Handlers
//!
//! Requests are handed to their collaborator on the ambient tokio runtime;
//! the outcome re-enters the dispatcher later as its own event through the
//! inbox. Nothing here blocks a dispatch or returns follow-ups directly.
//!
//! ```text
//! RequestPostUpdate ──route──> PostPersistence (spawned)
//!                                    │
//!        inbox <── RequestPostUpdateSuccess / RequestPostUpdateFailure
//!          │
//!        pump() ──> PersistenceObserver
//! ```

pub mod observer;
pub mod posts;
pub mod reusable_blocks;

pub use observer::{ObserverHandler, OBSERVED_KINDS};
pub use posts::{PostRequestHandler, POST_REQUEST_KINDS};
pub use reusable_blocks::{ReusableBlockRequestHandler, REUSABLE_BLOCK_REQUEST_KINDS};

use shared_bus::{EditorEvent, EventSender};
use std::future::Future;
use tokio::runtime::Handle;
use tracing::{trace, warn};

/// Run `request` on the current tokio runtime and post the events it yields
/// into the inbox. Returns `false` when there is no runtime to run on.
pub(crate) fn spawn_request<F>(handler: &'static str, sender: &EventSender, request: F) -> bool
where
    F: Future<Output = Vec<EditorEvent>> + Send + 'static,
{
    let Ok(runtime) = Handle::try_current() else {
        warn!(handler, "No async runtime, persistence request dropped");
        return false;
    };

    let sender = sender.clone();
    runtime.spawn(async move {
        for event in request.await {
            trace!(handler, kind = ?event.kind(), "Posting persistence outcome");
            sender.send(event);
        }
    });
    true
}
