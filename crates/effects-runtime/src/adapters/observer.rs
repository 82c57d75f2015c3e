//! Persistence observer adapters.

use parking_lot::Mutex;
use shared_bus::{EditorEvent, EventKind, EventSender, Notice, NoticeStatus};
use tracing::info;

use crate::ports::PersistenceObserver;

/// Logs every routed outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PersistenceObserver for TracingObserver {
    fn observe(&self, event: &EditorEvent) {
        info!(kind = ?event.kind(), "Persistence outcome");
    }
}

/// Keeps routed outcomes in memory.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<EditorEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<EditorEvent> {
        self.events.lock().clone()
    }

    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.lock().iter().map(EditorEvent::kind).collect()
    }
}

impl PersistenceObserver for RecordingObserver {
    fn observe(&self, event: &EditorEvent) {
        self.events.lock().push(event.clone());
    }
}

/// Turns post save and trash outcomes into user-facing notices.
///
/// Notices go through the inbox, so they are announced on the next pump.
#[derive(Debug, Clone)]
pub struct NoticeObserver {
    sender: EventSender,
}

impl NoticeObserver {
    pub const SAVE_NOTICE_ID: &'static str = "SAVE_POST_NOTICE_ID";
    pub const TRASH_NOTICE_ID: &'static str = "TRASH_POST_NOTICE_ID";

    pub fn new(sender: EventSender) -> Self {
        Self { sender }
    }

    /// Notice for `event`, if it deserves one.
    pub fn notice_for(event: &EditorEvent) -> Option<Notice> {
        let notice = match event {
            EditorEvent::RequestPostUpdateSuccess {
                is_autosave: false,
                ..
            } => Notice::new("Post updated.")
                .with_status(NoticeStatus::Success)
                .with_id(Self::SAVE_NOTICE_ID),
            EditorEvent::RequestPostUpdateFailure { error, .. } => {
                Notice::new(format!("Updating failed. {}", error.message))
                    .with_status(NoticeStatus::Error)
                    .with_id(Self::SAVE_NOTICE_ID)
            }
            EditorEvent::TrashPostFailure { error, .. } => {
                Notice::new(format!("Trashing failed. {}", error.message))
                    .with_status(NoticeStatus::Error)
                    .with_id(Self::TRASH_NOTICE_ID)
            }
            _ => return None,
        };
        Some(notice.dismissible())
    }
}

impl PersistenceObserver for NoticeObserver {
    fn observe(&self, event: &EditorEvent) {
        if let Some(notice) = Self::notice_for(event) {
            self.sender.send(EditorEvent::create_notice(notice));
        }
    }
}
