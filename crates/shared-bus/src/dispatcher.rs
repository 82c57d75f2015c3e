//! # Effect Dispatcher
//!
//! Routes events to the handlers registered for their kind.
//!
//! ## Ordering
//!
//! ```text
//! queue: [E0]
//!   E0 ── apply ──> store
//!      └─ handlers(E0) in registration order ──> [F1, F2]   (appended)
//! queue: [F1, F2]
//!   F1 ── apply ──> store
//!      └─ handlers(F1) ──> [G1]                             (appended)
//! queue: [F2, G1]
//! ```
//!
//! Follow-ups are processed breadth-first from a queue, never by nested
//! calls, so causal order is deterministic and stack depth stays flat.
//!
//! Asynchronous collaborators never block a dispatch: they post their
//! outcome into the inbox through an [`EventSender`], and the host drains it
//! with [`EffectDispatcher::pump`].

use crate::config::DispatcherConfig;
use crate::events::{EditorEvent, EventFilter, EventKind};
use crate::handler::{EffectError, EffectHandler, Effects, HandlerSet};
use crate::store::DocumentStore;
use shared_types::{DocumentAccessor, DocumentError};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

/// Errors that abort a dispatch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// A handler reported a precondition violation (strict mode only).
    #[error("Handler {handler} failed on {kind:?}: {source}")]
    Effect {
        handler: &'static str,
        kind: EventKind,
        #[source]
        source: EffectError,
    },

    /// The document container rejected an event (strict mode only).
    #[error("Document store rejected {kind:?}: {source}")]
    Store {
        kind: EventKind,
        #[source]
        source: DocumentError,
    },

    /// Too many events in one causal chain.
    #[error("Event chain exceeded {limit} events")]
    ChainLimitExceeded { limit: usize },
}

/// Handle for posting events into the dispatcher inbox.
#[derive(Clone, Debug)]
pub struct EventSender {
    sender: mpsc::UnboundedSender<EditorEvent>,
}

impl EventSender {
    /// Post an event. Returns `false` if the dispatcher is gone.
    pub fn send(&self, event: EditorEvent) -> bool {
        match self.sender.send(event) {
            Ok(()) => true,
            Err(err) => {
                warn!(kind = ?err.0.kind(), "Inbox closed, event dropped");
                false
            }
        }
    }
}

/// Every event processed by one dispatch, in causal order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchReport {
    processed: Vec<EditorEvent>,
}

impl DispatchReport {
    #[must_use]
    pub fn events(&self) -> &[EditorEvent] {
        &self.processed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.processed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.processed.is_empty()
    }

    /// Kinds in processing order.
    #[must_use]
    pub fn kinds(&self) -> Vec<EventKind> {
        self.processed.iter().map(EditorEvent::kind).collect()
    }

    /// Processed events matching `filter`.
    pub fn matching<'a>(&'a self, filter: &'a EventFilter) -> impl Iterator<Item = &'a EditorEvent> {
        self.processed.iter().filter(move |event| filter.matches(event))
    }

    /// Events emitted as follow-ups (everything after the trigger).
    #[must_use]
    pub fn follow_ups(&self) -> &[EditorEvent] {
        self.processed.get(1..).unwrap_or(&[])
    }

    pub fn extend(&mut self, other: DispatchReport) {
        self.processed.extend(other.processed);
    }
}

/// Event→effect dispatch engine.
pub struct EffectDispatcher {
    handlers: HashMap<EventKind, Vec<Arc<dyn EffectHandler>>>,
    config: DispatcherConfig,
    inbox_tx: mpsc::UnboundedSender<EditorEvent>,
    inbox_rx: mpsc::UnboundedReceiver<EditorEvent>,
    events_processed: u64,
}

impl EffectDispatcher {
    /// Create a dispatcher with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DispatcherConfig::default())
    }

    #[must_use]
    pub fn with_config(config: DispatcherConfig) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            handlers: HashMap::new(),
            config,
            inbox_tx,
            inbox_rx,
            events_processed: 0,
        }
    }

    /// Register one handler or an ordered list of handlers for `kind`.
    ///
    /// Handlers run after any previously registered for the same kind.
    pub fn register(&mut self, kind: EventKind, handlers: impl Into<HandlerSet>) -> &mut Self {
        let handlers = handlers.into();
        debug!(kind = ?kind, handlers = ?handlers, "Registering effect handlers");
        self.handlers
            .entry(kind)
            .or_default()
            .extend(handlers.into_inner());
        self
    }

    /// Number of handlers registered for `kind`.
    #[must_use]
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    /// Kinds with at least one handler.
    #[must_use]
    pub fn registered_kinds(&self) -> Vec<EventKind> {
        let mut kinds: Vec<EventKind> = self.handlers.keys().copied().collect();
        kinds.sort();
        kinds
    }

    #[must_use]
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Total events processed over the dispatcher's lifetime.
    #[must_use]
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    /// Sender for asynchronous collaborators to post completion events.
    #[must_use]
    pub fn event_sender(&self) -> EventSender {
        EventSender {
            sender: self.inbox_tx.clone(),
        }
    }

    /// Run every handler registered for the event's kind, in order.
    ///
    /// Returns the concatenated follow-ups. Nothing is applied or re-dispatched.
    pub fn handle(
        &self,
        event: &EditorEvent,
        state: &dyn DocumentAccessor,
    ) -> Result<Effects, DispatchError> {
        let kind = event.kind();
        let Some(handlers) = self.handlers.get(&kind) else {
            trace!(kind = ?kind, "No handlers registered");
            return Ok(Vec::new());
        };

        let mut effects = Vec::new();
        for handler in handlers {
            match handler.handle(event, state) {
                Ok(emitted) => {
                    trace!(
                        kind = ?kind,
                        handler = handler.name(),
                        emitted = emitted.len(),
                        "Handler completed"
                    );
                    effects.extend(emitted);
                }
                Err(source) if self.config.strict_preconditions => {
                    return Err(DispatchError::Effect {
                        handler: handler.name(),
                        kind,
                        source,
                    });
                }
                Err(source) => {
                    warn!(
                        kind = ?kind,
                        handler = handler.name(),
                        error = %source,
                        "Precondition violated, effect skipped"
                    );
                }
            }
        }

        Ok(effects)
    }

    /// Commit `event` to `store` and process its effect chain breadth-first.
    pub fn dispatch<S: DocumentStore>(
        &mut self,
        event: EditorEvent,
        store: &mut S,
    ) -> Result<DispatchReport, DispatchError> {
        let mut queue = VecDeque::from([event]);
        let mut report = DispatchReport::default();

        while let Some(event) = queue.pop_front() {
            if report.len() >= self.config.max_chain_length {
                warn!(
                    limit = self.config.max_chain_length,
                    pending = queue.len() + 1,
                    "Event chain limit reached"
                );
                return Err(DispatchError::ChainLimitExceeded {
                    limit: self.config.max_chain_length,
                });
            }

            let kind = event.kind();
            if let Err(source) = store.apply(&event) {
                if self.config.strict_preconditions {
                    return Err(DispatchError::Store { kind, source });
                }
                // A rejected event changed nothing, so its effects do not run.
                warn!(kind = ?kind, error = %source, "Document store rejected event, effects skipped");
                self.events_processed += 1;
                report.processed.push(event);
                continue;
            }

            let follow_ups = self.handle(&event, &*store)?;
            debug!(kind = ?kind, follow_ups = follow_ups.len(), "Event dispatched");

            self.events_processed += 1;
            report.processed.push(event);
            queue.extend(follow_ups);
        }

        Ok(report)
    }

    /// Dispatch every event currently waiting in the inbox, in arrival order.
    pub fn pump<S: DocumentStore>(&mut self, store: &mut S) -> Result<DispatchReport, DispatchError> {
        let mut report = DispatchReport::default();
        while let Ok(event) = self.inbox_rx.try_recv() {
            report.extend(self.dispatch(event, store)?);
        }
        Ok(report)
    }

    /// Wait for the next inbox event and dispatch it.
    ///
    /// Never returns `None` while the dispatcher is alive, since it holds a sender itself.
    pub async fn recv_and_dispatch<S: DocumentStore>(
        &mut self,
        store: &mut S,
    ) -> Option<Result<DispatchReport, DispatchError>> {
        let event = self.inbox_rx.recv().await?;
        Some(self.dispatch(event, store))
    }
}

impl Default for EffectDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
