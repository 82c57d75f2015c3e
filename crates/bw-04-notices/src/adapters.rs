//! Announcer adapters.

use crate::ports::{AnnounceError, Announcer, Politeness};
use parking_lot::Mutex;
use tracing::info;

/// Writes announcements to the log. Used when no screen reader is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnnouncer;

impl Announcer for TracingAnnouncer {
    fn speak(&self, message: &str, politeness: Politeness) -> Result<(), AnnounceError> {
        info!(politeness = politeness.as_str(), message, "Announcement");
        Ok(())
    }
}

/// Keeps every announcement in memory, optionally failing each call.
#[derive(Debug, Default)]
pub struct RecordingAnnouncer {
    spoken: Mutex<Vec<(String, Politeness)>>,
    failure: Option<AnnounceError>,
}

impl RecordingAnnouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Announcer that records nothing and returns `error` on every call.
    pub fn failing(error: AnnounceError) -> Self {
        Self {
            spoken: Mutex::new(Vec::new()),
            failure: Some(error),
        }
    }

    /// Everything spoken so far, oldest first.
    pub fn spoken(&self) -> Vec<(String, Politeness)> {
        self.spoken.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.spoken
            .lock()
            .iter()
            .map(|(message, _)| message.clone())
            .collect()
    }
}

impl Announcer for RecordingAnnouncer {
    fn speak(&self, message: &str, politeness: Politeness) -> Result<(), AnnounceError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.spoken.lock().push((message.to_string(), politeness));
        Ok(())
    }
}
