//! # Blockwright Effects Runtime
//!
//! Replays a session file through the full effect stack and prints the
//! final document as JSON.
//!
//! ```text
//! effects-runtime <session.json>
//! ```
//!
//! Each event is dispatched, then asynchronous persistence outcomes are
//! drained before the next one, so the replay is deterministic.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use bw_telemetry::{init_telemetry, TelemetryConfig};
use effects_runtime::{EditorRuntime, RuntimeConfig, Session};
use tracing::{info, warn};

/// How long the inbox must stay quiet before the next event is replayed.
const SETTLE_IDLE: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::from_env())
        .context("Failed to initialize telemetry")?;

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: effects-runtime <session.json>");
    };

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read session file {path}"))?;
    let session = Session::from_json(&raw).with_context(|| format!("Invalid session file {path}"))?;
    let config = RuntimeConfig::from_env().context("Invalid runtime configuration")?;

    let collaborators = session.collaborators();
    let mut runtime = EditorRuntime::with_document(config, &collaborators, session.document)?;

    info!(events = session.events.len(), path = %path, "Replaying session");
    let mut processed = 0usize;
    for (index, event) in session.events.into_iter().enumerate() {
        let kind = event.kind();
        let report = runtime
            .dispatch(event)
            .with_context(|| format!("Event #{index} ({kind:?}) failed"))?;
        let settled = runtime
            .settle(SETTLE_IDLE)
            .await
            .with_context(|| format!("Completions of event #{index} ({kind:?}) failed"))?;
        processed += report.len() + settled.len();
    }

    if runtime.document().history().is_empty() {
        warn!("Session made no structural change");
    }
    info!(processed, "Replay finished");

    println!("{}", serde_json::to_string_pretty(runtime.document().present())?);
    Ok(())
}
