//! Outbound ports for the Notices subsystem.

use thiserror::Error;

/// How urgently a message interrupts the screen reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Politeness {
    /// Waits until the reader is idle.
    Polite,
    /// Interrupts whatever is being read.
    Assertive,
}

impl Politeness {
    /// ARIA live region value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Polite => "polite",
            Self::Assertive => "assertive",
        }
    }
}

/// Errors reported by an announcer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnnounceError {
    /// No live region is available to speak into.
    #[error("Announcer unavailable: {0}")]
    Unavailable(String),

    #[error("Announcement rejected: {0}")]
    Rejected(String),
}

/// Speaks a message to assistive technology.
pub trait Announcer: Send + Sync {
    fn speak(&self, message: &str, politeness: Politeness) -> Result<(), AnnounceError>;
}
