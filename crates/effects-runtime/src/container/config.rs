//! # Runtime Configuration
//!
//! Unified configuration for the dispatcher and the document container.
//!
//! All limits have defaults and can be overridden through `BW_*`
//! environment variables.

use serde::{Deserialize, Serialize};
use shared_bus::DispatcherConfig;
use shared_types::History;
use std::env;
use thiserror::Error;

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Dispatcher configuration.
    pub dispatcher: DispatcherConfig,
    /// Document container configuration.
    pub document: DocumentConfig,
}

impl RuntimeConfig {
    /// Read every section from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            dispatcher: DispatcherConfig::from_env(),
            document: DocumentConfig::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject limits that would make the runtime unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dispatcher.max_chain_length == 0 {
            return Err(ConfigError::OutOfRange {
                key: "BW_MAX_CHAIN_LENGTH",
                value: 0,
            });
        }
        if self.document.history_limit == 0 {
            return Err(ConfigError::OutOfRange {
                key: "BW_HISTORY_LIMIT",
                value: 0,
            });
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    NotANumber { key: &'static str, value: String },

    #[error("{key} is out of range: {value}")]
    OutOfRange { key: &'static str, value: usize },
}

/// Document container configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Past snapshots kept for undo and selection recovery.
    pub history_limit: usize,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            history_limit: History::DEFAULT_LIMIT,
        }
    }
}

impl DocumentConfig {
    /// - `BW_HISTORY_LIMIT`: Retained snapshots (default: 100)
    pub fn from_env() -> Result<Self, ConfigError> {
        let history_limit = match env::var("BW_HISTORY_LIMIT") {
            Ok(value) => value.trim().parse().map_err(|_| ConfigError::NotANumber {
                key: "BW_HISTORY_LIMIT",
                value,
            })?,
            Err(_) => History::DEFAULT_LIMIT,
        };
        Ok(Self { history_limit })
    }
}
