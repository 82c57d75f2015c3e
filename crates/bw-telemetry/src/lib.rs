//! # Blockwright Telemetry
//!
//! Structured logging for the effect runtime.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bw_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("telemetry");
//!     // Effect dispatch now logs through tracing
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BW_SERVICE_NAME` | `blockwright` | Service name attached to every event |
//! | `BW_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `BW_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `BW_JSON_LOGS` | `false` | JSON lines instead of human-readable output |

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter {filter:?}: {reason}")]
    Filter { filter: String, reason: String },

    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),
}

/// Install the global tracing subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    tracing_setup::init_tracing(&config)?;
    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Held for the lifetime of the application; logs shutdown on drop.
pub struct TelemetryGuard {
    service_name: String,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry");
    }
}

/// Span carrying the name of the effect subsystem doing the work.
///
/// ```rust,ignore
/// let _span = subsystem_span!("resolve_merge", subsystem = "block-merge").entered();
/// ```
#[macro_export]
macro_rules! subsystem_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}
