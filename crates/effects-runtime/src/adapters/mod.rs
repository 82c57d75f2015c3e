//! # Adapters
//!
//! Concrete implementations of the document container and the collaborator
//! ports, all backed by process memory.

pub mod in_memory_document;
pub mod observer;
pub mod persistence;

pub use in_memory_document::InMemoryDocument;
pub use observer::{NoticeObserver, RecordingObserver, TracingObserver};
pub use persistence::{InMemoryPostStore, InMemoryReusableBlockStore};
