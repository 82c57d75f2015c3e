//! # Shared Bus - Effect Dispatch for the Block Editor
//!
//! Routes document events to effect handlers and feeds their follow-up
//! events back through the same queue.
//!
//! ## Architecture Rules
//!
//! - Effect subsystems never call each other; they only emit events.
//! - Effect subsystems never mutate the document; the `DocumentStore` does.
//! - Asynchronous collaborators report back through the inbox, never through
//!   return values.
//!
//! ## Dispatch Flow
//!
//! ```text
//! ┌──────────────┐  dispatch()   ┌──────────────┐  apply()   ┌──────────────┐
//! │    Host      │ ────────────> │  Dispatcher  │ ─────────> │DocumentStore │
//! └──────────────┘               │   (queue)    │            └──────────────┘
//!                                │              │  handle()  ┌──────────────┐
//!        EventSender ──inbox───> │              │ ─────────> │   Handlers   │
//!                                └──────────────┘ <───────── └──────────────┘
//!                                                 follow-ups
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod config;
pub mod dispatcher;
pub mod events;
pub mod handler;
pub mod store;

// Re-export main types
pub use config::DispatcherConfig;
pub use dispatcher::{DispatchError, DispatchReport, EffectDispatcher, EventSender};
pub use events::{
    EditorEvent, EventFilter, EventKind, EventTopic, Notice, NoticeStatus, PersistenceFailure,
    ReusableBlock, ReusableBlockId,
};
pub use handler::{handler_fn, EffectError, EffectHandler, Effects, FnHandler, HandlerSet};
pub use store::DocumentStore;

/// Maximum events processed by a single dispatch before it is aborted.
pub const DEFAULT_MAX_CHAIN_LENGTH: usize = 1024;
