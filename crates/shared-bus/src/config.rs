//! Configuration for the effect dispatcher.

use crate::DEFAULT_MAX_CHAIN_LENGTH;
use serde::{Deserialize, Serialize};
use std::env;

/// Dispatcher configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatcherConfig {
    /// Maximum events processed by a single `dispatch` call (runaway effect loops).
    pub max_chain_length: usize,
    /// Abort on handler precondition violations instead of skipping them.
    pub strict_preconditions: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            max_chain_length: DEFAULT_MAX_CHAIN_LENGTH,
            strict_preconditions: cfg!(debug_assertions),
        }
    }
}

impl DispatcherConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `BW_MAX_CHAIN_LENGTH`: Event chain bound (default: 1024)
    /// - `BW_STRICT_PRECONDITIONS`: `true`/`false` (default: debug builds only)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_chain_length: env::var("BW_MAX_CHAIN_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_chain_length),

            strict_preconditions: env::var("BW_STRICT_PRECONDITIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.strict_preconditions),
        }
    }

    /// Lenient configuration: violations are logged and skipped.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            strict_preconditions: false,
            ..Self::default()
        }
    }

    /// Strict configuration: the first violation aborts the dispatch.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strict_preconditions: true,
            ..Self::default()
        }
    }
}
