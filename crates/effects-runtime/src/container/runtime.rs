//! Host-facing editor runtime.

use std::time::Duration;

use shared_bus::{DispatchError, DispatchReport, EditorEvent, EffectDispatcher, EventFilter};
use shared_types::DocumentSnapshot;
use tracing::{debug, info};

use super::config::{ConfigError, RuntimeConfig};
use crate::adapters::InMemoryDocument;
use crate::wiring::{build_dispatcher, Collaborators};

/// Dispatcher and document container wired together.
pub struct EditorRuntime {
    dispatcher: EffectDispatcher,
    document: InMemoryDocument,
}

impl EditorRuntime {
    /// Runtime over an empty document.
    pub fn new(config: RuntimeConfig, collaborators: &Collaborators) -> Result<Self, ConfigError> {
        Self::with_document(config, collaborators, DocumentSnapshot::default())
    }

    /// Runtime over `snapshot`, with an empty past.
    pub fn with_document(
        config: RuntimeConfig,
        collaborators: &Collaborators,
        snapshot: DocumentSnapshot,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            max_chain_length = config.dispatcher.max_chain_length,
            strict = config.dispatcher.strict_preconditions,
            history_limit = config.document.history_limit,
            "Creating editor runtime"
        );

        Ok(Self {
            dispatcher: build_dispatcher(config.dispatcher, collaborators),
            document: InMemoryDocument::with_snapshot(snapshot, &config.document),
        })
    }

    #[must_use]
    pub fn document(&self) -> &InMemoryDocument {
        &self.document
    }

    #[must_use]
    pub fn dispatcher(&self) -> &EffectDispatcher {
        &self.dispatcher
    }

    /// Commit `event` and run its effect chain.
    pub fn dispatch(&mut self, event: EditorEvent) -> Result<DispatchReport, DispatchError> {
        let _span = bw_telemetry::subsystem_span!(
            "dispatch",
            subsystem = "effects-runtime",
            kind = ?event.kind()
        )
        .entered();
        self.dispatcher.dispatch(event, &mut self.document)
    }

    /// Dispatch whatever asynchronous collaborators have posted so far.
    pub fn pump(&mut self) -> Result<DispatchReport, DispatchError> {
        self.dispatcher.pump(&mut self.document)
    }

    /// Keep dispatching inbox events until none arrives for `idle`.
    pub async fn settle(&mut self, idle: Duration) -> Result<DispatchReport, DispatchError> {
        let mut report = DispatchReport::default();
        loop {
            let next = tokio::time::timeout(idle, self.dispatcher.recv_and_dispatch(&mut self.document));
            match next.await {
                Ok(Some(dispatched)) => report.extend(dispatched?),
                Ok(None) | Err(_) => break,
            }
        }
        debug!(events = report.len(), "Runtime settled");
        Ok(report)
    }

    /// Keep dispatching inbox events until one matching `filter` has been
    /// processed, or nothing arrives for `idle`.
    pub async fn settle_until(
        &mut self,
        filter: &EventFilter,
        idle: Duration,
    ) -> Result<DispatchReport, DispatchError> {
        let mut report = DispatchReport::default();
        loop {
            let next = tokio::time::timeout(idle, self.dispatcher.recv_and_dispatch(&mut self.document));
            match next.await {
                Ok(Some(dispatched)) => {
                    let dispatched = dispatched?;
                    let done = dispatched.matching(filter).next().is_some();
                    report.extend(dispatched);
                    if done {
                        break;
                    }
                }
                Ok(None) | Err(_) => break,
            }
        }
        Ok(report)
    }
}
