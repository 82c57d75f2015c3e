//! Persistence ports for posts and reusable blocks.

use async_trait::async_trait;
use serde_json::Value;
use shared_bus::{PersistenceFailure, ReusableBlock, ReusableBlockId};
use thiserror::Error;

/// Errors reported by persistence collaborators.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: u64 },

    /// The write conflicts with the stored version.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Backend unreachable.
    #[error("Persistence unavailable: {0}")]
    Unavailable(String),
}

impl PersistenceError {
    /// Machine-readable code carried by failure events.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Conflict(_) => "conflict",
            Self::Unavailable(_) => "unavailable",
        }
    }

    /// Event payload form of this error.
    #[must_use]
    pub fn to_failure(&self) -> PersistenceFailure {
        PersistenceFailure::new(self.code(), self.to_string())
    }
}

/// Result of a successful post update.
#[derive(Debug, Clone, PartialEq)]
pub struct PostUpdate {
    /// Post as stored before the edits.
    pub previous: Value,
    /// Post as stored after the edits.
    pub current: Value,
}

/// Server-side post storage.
#[async_trait]
pub trait PostPersistence: Send + Sync {
    /// Apply `edits` (a JSON object of changed fields) to a post.
    async fn update_post(
        &self,
        post_id: u64,
        edits: &Value,
        is_autosave: bool,
    ) -> Result<PostUpdate, PersistenceError>;

    async fn trash_post(&self, post_id: u64, post_type: &str) -> Result<(), PersistenceError>;

    /// Current stored version of a post.
    async fn refresh_post(&self, post_id: u64, post_type: &str) -> Result<Value, PersistenceError>;
}

/// Server-side reusable block storage.
#[async_trait]
pub trait ReusableBlockPersistence: Send + Sync {
    /// One reusable block, or all of them when `id` is `None`.
    async fn fetch(&self, id: Option<ReusableBlockId>)
        -> Result<Vec<ReusableBlock>, PersistenceError>;

    /// Persist a reusable block. Returns its id on the server, which differs
    /// from `id` when the block had only been created locally.
    async fn save(&self, id: ReusableBlockId) -> Result<ReusableBlockId, PersistenceError>;

    async fn delete(&self, id: ReusableBlockId) -> Result<(), PersistenceError>;
}
