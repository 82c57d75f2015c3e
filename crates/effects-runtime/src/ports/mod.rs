//! # Collaborator Ports
//!
//! Outbound contracts the runtime consumes. Persistence collaborators are
//! asynchronous; the observer is a synchronous sink for routed outcomes.

pub mod observer;
pub mod persistence;

pub use observer::PersistenceObserver;
pub use persistence::{PersistenceError, PostPersistence, PostUpdate, ReusableBlockPersistence};
