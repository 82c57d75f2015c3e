//! # Effect Handlers
//!
//! Defines the handler side of the bus and the error type handlers report
//! precondition violations with.

use crate::events::{EditorEvent, EventKind};
use shared_types::{ClientId, DocumentAccessor};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Follow-up events produced by a handler. Empty means "nothing to emit".
pub type Effects = Vec<EditorEvent>;

/// Precondition violations detected while computing effects.
///
/// Impossible merges and other defined no-op outcomes are NOT errors; they
/// produce empty [`Effects`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EffectError {
    /// Referenced block is not in the document.
    #[error("Block not found: {0}")]
    BlockNotFound(ClientId),

    /// Block type has no registry entry.
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    /// History has no snapshot to read from.
    #[error("No history snapshot available")]
    MissingHistory,

    /// Event payload is structurally unusable.
    #[error("Malformed {kind:?} payload: {reason}")]
    MalformedPayload { kind: EventKind, reason: String },

    /// Handler received an event kind it was not written for.
    #[error("Handler {handler} cannot handle {kind:?}")]
    UnexpectedEvent {
        handler: &'static str,
        kind: EventKind,
    },
}

/// A side-effect computation registered against an event kind.
pub trait EffectHandler: Send + Sync {
    /// Stable name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Compute follow-up events for `event` against current document state.
    fn handle(
        &self,
        event: &EditorEvent,
        state: &dyn DocumentAccessor,
    ) -> Result<Effects, EffectError>;
}

/// Closure-backed handler.
pub struct FnHandler<F> {
    name: &'static str,
    f: F,
}

impl<F> EffectHandler for FnHandler<F>
where
    F: Fn(&EditorEvent, &dyn DocumentAccessor) -> Result<Effects, EffectError> + Send + Sync,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn handle(
        &self,
        event: &EditorEvent,
        state: &dyn DocumentAccessor,
    ) -> Result<Effects, EffectError> {
        (self.f)(event, state)
    }
}

/// Wrap a closure as a named handler.
pub fn handler_fn<F>(name: &'static str, f: F) -> FnHandler<F>
where
    F: Fn(&EditorEvent, &dyn DocumentAccessor) -> Result<Effects, EffectError> + Send + Sync,
{
    FnHandler { name, f }
}

/// Ordered list of handlers for one event kind.
///
/// Both a single handler and a list of handlers convert into a `HandlerSet`,
/// so registration always deals with one uniform shape.
#[derive(Clone, Default)]
pub struct HandlerSet {
    handlers: Vec<Arc<dyn EffectHandler>>,
}

impl HandlerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler.
    pub fn with<H: EffectHandler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn EffectHandler>> {
        self.handlers.iter()
    }

    pub(crate) fn into_inner(self) -> Vec<Arc<dyn EffectHandler>> {
        self.handlers
    }
}

impl fmt::Debug for HandlerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.handlers.iter().map(|handler| handler.name()))
            .finish()
    }
}

impl<H: EffectHandler + 'static> From<H> for HandlerSet {
    fn from(handler: H) -> Self {
        Self::new().with(handler)
    }
}

impl From<Vec<Arc<dyn EffectHandler>>> for HandlerSet {
    fn from(handlers: Vec<Arc<dyn EffectHandler>>) -> Self {
        Self { handlers }
    }
}
