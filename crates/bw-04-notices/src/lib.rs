//! # BW-04: Notices
//!
//! Speaks newly created notices through an assistive-technology announcer.
//!
//! ## Architecture
//!
//! - **Ports**: `Announcer` (outbound), `Politeness`
//! - **Adapters**: `TracingAnnouncer` for headless hosts, `RecordingAnnouncer`
//!   for hosts that inspect what was spoken
//! - **Handler**: `CreateNoticeHandler`, fire-and-forget, emits nothing
//!
//! Announcement is best-effort: a failing announcer is logged and ignored.

pub mod adapters;
pub mod handler;
pub mod ports;

pub use adapters::{RecordingAnnouncer, TracingAnnouncer};
pub use handler::{spoken_text, CreateNoticeHandler};
pub use ports::{AnnounceError, Announcer, Politeness};
