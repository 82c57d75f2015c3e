//! # Editor Events
//!
//! Defines all event types that flow through the shared bus.
//!
//! Events are immutable once emitted. Every event has a fieldless
//! [`EventKind`] used as the handler registration key, and a coarser
//! [`EventTopic`] used for logging and filtering.

use serde::{Deserialize, Serialize};
use shared_types::{Block, Caret, ClientId, Template, TemplateLock};

/// Identifier of a reusable block fragment on the server.
pub type ReusableBlockId = u64;

/// All events that can be dispatched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "kind",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum EditorEvent {
    // =========================================================================
    // BLOCK LIST (document container)
    // =========================================================================
    /// Merge `donor` into `receiving`.
    MergeBlocks { receiving: ClientId, donor: ClientId },

    /// Replace the whole block list.
    ResetBlocks { blocks: Vec<Block> },

    /// Replace `client_ids` with `blocks`, inserted where the first id sat.
    ReplaceBlocks {
        client_ids: Vec<ClientId>,
        blocks: Vec<Block>,
    },

    /// Remove blocks, optionally selecting what preceded the first one.
    RemoveBlocks {
        client_ids: Vec<ClientId>,
        select_previous: bool,
    },

    /// Select a block, optionally placing the caret.
    SelectBlock {
        client_id: ClientId,
        initial_position: Option<Caret>,
    },

    // =========================================================================
    // TEMPLATE
    // =========================================================================
    /// Force the block list to follow the template.
    SynchronizeTemplate,

    /// Recompute template validity unconditionally.
    CheckTemplateValidity,

    /// Store a template validity result.
    SetTemplateValidity { is_valid: bool },

    /// Change the template and its lock mode.
    UpdateTemplate {
        template: Option<Template>,
        lock: TemplateLock,
    },

    // =========================================================================
    // NOTICES
    // =========================================================================
    /// Show a notice and announce it to assistive technology.
    CreateNotice { notice: Notice },

    // =========================================================================
    // POST PERSISTENCE (routed to the post collaborator)
    // =========================================================================
    RequestPostUpdate {
        post_id: u64,
        edits: serde_json::Value,
        is_autosave: bool,
    },
    RequestPostUpdateSuccess {
        previous_post: serde_json::Value,
        post: serde_json::Value,
        is_autosave: bool,
    },
    RequestPostUpdateFailure {
        post: serde_json::Value,
        error: PersistenceFailure,
    },
    TrashPost { post_id: u64, post_type: String },
    TrashPostSuccess { post_id: u64 },
    TrashPostFailure {
        post_id: u64,
        error: PersistenceFailure,
    },
    RefreshPost { post_id: u64, post_type: String },
    RefreshPostSuccess { post: serde_json::Value },

    // =========================================================================
    // REUSABLE BLOCKS (routed to the reusable-fragment collaborator)
    // =========================================================================
    /// Fetch one reusable block, or all of them when `id` is `None`.
    FetchReusableBlocks { id: Option<ReusableBlockId> },
    FetchReusableBlocksSuccess { id: Option<ReusableBlockId> },
    FetchReusableBlocksFailure {
        id: Option<ReusableBlockId>,
        error: PersistenceFailure,
    },
    ReceiveReusableBlocks { results: Vec<ReusableBlock> },
    SaveReusableBlock { id: ReusableBlockId },
    SaveReusableBlockSuccess {
        id: ReusableBlockId,
        updated_id: ReusableBlockId,
    },
    SaveReusableBlockFailure {
        id: ReusableBlockId,
        error: PersistenceFailure,
    },
    DeleteReusableBlock { id: ReusableBlockId },
    DeleteReusableBlockSuccess { id: ReusableBlockId },
    DeleteReusableBlockFailure {
        id: ReusableBlockId,
        error: PersistenceFailure,
    },
    ConvertBlockToStatic { client_id: ClientId },
    ConvertBlockToReusable { client_ids: Vec<ClientId> },
}

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeStatus {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing notice.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: NoticeStatus,
    /// Visible text.
    pub content: String,
    /// Text read by screen readers instead of `content`.
    #[serde(default)]
    pub spoken_message: Option<String>,
    #[serde(default)]
    pub is_dismissible: bool,
}

impl Notice {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_spoken_message(mut self, message: impl Into<String>) -> Self {
        self.spoken_message = Some(message.into());
        self
    }

    pub fn with_status(mut self, status: NoticeStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Let the user close the notice.
    pub fn dismissible(mut self) -> Self {
        self.is_dismissible = true;
        self
    }
}

/// A reusable block fragment as stored on the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReusableBlock {
    pub id: ReusableBlockId,
    pub title: String,
    pub content: Vec<Block>,
}

/// Error reported by a persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceFailure {
    /// Machine-readable error code.
    pub code: String,
    /// Error message.
    pub message: String,
}

impl PersistenceFailure {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl EditorEvent {
    pub fn merge_blocks(receiving: impl Into<ClientId>, donor: impl Into<ClientId>) -> Self {
        Self::MergeBlocks {
            receiving: receiving.into(),
            donor: donor.into(),
        }
    }

    pub fn select_block(client_id: impl Into<ClientId>, initial_position: Option<Caret>) -> Self {
        Self::SelectBlock {
            client_id: client_id.into(),
            initial_position,
        }
    }

    pub fn replace_blocks(client_ids: Vec<ClientId>, blocks: Vec<Block>) -> Self {
        Self::ReplaceBlocks { client_ids, blocks }
    }

    pub fn reset_blocks(blocks: Vec<Block>) -> Self {
        Self::ResetBlocks { blocks }
    }

    pub fn remove_blocks(client_ids: Vec<ClientId>, select_previous: bool) -> Self {
        Self::RemoveBlocks {
            client_ids,
            select_previous,
        }
    }

    pub fn set_template_validity(is_valid: bool) -> Self {
        Self::SetTemplateValidity { is_valid }
    }

    pub fn create_notice(notice: Notice) -> Self {
        Self::CreateNotice { notice }
    }

    /// Registration key of this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::MergeBlocks { .. } => EventKind::MergeBlocks,
            Self::ResetBlocks { .. } => EventKind::ResetBlocks,
            Self::ReplaceBlocks { .. } => EventKind::ReplaceBlocks,
            Self::RemoveBlocks { .. } => EventKind::RemoveBlocks,
            Self::SelectBlock { .. } => EventKind::SelectBlock,
            Self::SynchronizeTemplate => EventKind::SynchronizeTemplate,
            Self::CheckTemplateValidity => EventKind::CheckTemplateValidity,
            Self::SetTemplateValidity { .. } => EventKind::SetTemplateValidity,
            Self::UpdateTemplate { .. } => EventKind::UpdateTemplate,
            Self::CreateNotice { .. } => EventKind::CreateNotice,
            Self::RequestPostUpdate { .. } => EventKind::RequestPostUpdate,
            Self::RequestPostUpdateSuccess { .. } => EventKind::RequestPostUpdateSuccess,
            Self::RequestPostUpdateFailure { .. } => EventKind::RequestPostUpdateFailure,
            Self::TrashPost { .. } => EventKind::TrashPost,
            Self::TrashPostSuccess { .. } => EventKind::TrashPostSuccess,
            Self::TrashPostFailure { .. } => EventKind::TrashPostFailure,
            Self::RefreshPost { .. } => EventKind::RefreshPost,
            Self::RefreshPostSuccess { .. } => EventKind::RefreshPostSuccess,
            Self::FetchReusableBlocks { .. } => EventKind::FetchReusableBlocks,
            Self::FetchReusableBlocksSuccess { .. } => EventKind::FetchReusableBlocksSuccess,
            Self::FetchReusableBlocksFailure { .. } => EventKind::FetchReusableBlocksFailure,
            Self::ReceiveReusableBlocks { .. } => EventKind::ReceiveReusableBlocks,
            Self::SaveReusableBlock { .. } => EventKind::SaveReusableBlock,
            Self::SaveReusableBlockSuccess { .. } => EventKind::SaveReusableBlockSuccess,
            Self::SaveReusableBlockFailure { .. } => EventKind::SaveReusableBlockFailure,
            Self::DeleteReusableBlock { .. } => EventKind::DeleteReusableBlock,
            Self::DeleteReusableBlockSuccess { .. } => EventKind::DeleteReusableBlockSuccess,
            Self::DeleteReusableBlockFailure { .. } => EventKind::DeleteReusableBlockFailure,
            Self::ConvertBlockToStatic { .. } => EventKind::ConvertBlockToStatic,
            Self::ConvertBlockToReusable { .. } => EventKind::ConvertBlockToReusable,
        }
    }

    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        self.kind().topic()
    }
}

/// Fieldless event discriminant used to register handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    MergeBlocks,
    ResetBlocks,
    ReplaceBlocks,
    RemoveBlocks,
    SelectBlock,
    SynchronizeTemplate,
    CheckTemplateValidity,
    SetTemplateValidity,
    UpdateTemplate,
    CreateNotice,
    RequestPostUpdate,
    RequestPostUpdateSuccess,
    RequestPostUpdateFailure,
    TrashPost,
    TrashPostSuccess,
    TrashPostFailure,
    RefreshPost,
    RefreshPostSuccess,
    FetchReusableBlocks,
    FetchReusableBlocksSuccess,
    FetchReusableBlocksFailure,
    ReceiveReusableBlocks,
    SaveReusableBlock,
    SaveReusableBlockSuccess,
    SaveReusableBlockFailure,
    DeleteReusableBlock,
    DeleteReusableBlockSuccess,
    DeleteReusableBlockFailure,
    ConvertBlockToStatic,
    ConvertBlockToReusable,
}

impl EventKind {
    #[must_use]
    pub fn topic(self) -> EventTopic {
        match self {
            Self::MergeBlocks | Self::ResetBlocks | Self::ReplaceBlocks | Self::RemoveBlocks => {
                EventTopic::Blocks
            }
            Self::SelectBlock => EventTopic::Selection,
            Self::SynchronizeTemplate
            | Self::CheckTemplateValidity
            | Self::SetTemplateValidity
            | Self::UpdateTemplate => EventTopic::Template,
            Self::CreateNotice => EventTopic::Notices,
            Self::RequestPostUpdate
            | Self::RequestPostUpdateSuccess
            | Self::RequestPostUpdateFailure
            | Self::TrashPost
            | Self::TrashPostSuccess
            | Self::TrashPostFailure
            | Self::RefreshPost
            | Self::RefreshPostSuccess => EventTopic::Posts,
            Self::FetchReusableBlocks
            | Self::FetchReusableBlocksSuccess
            | Self::FetchReusableBlocksFailure
            | Self::ReceiveReusableBlocks
            | Self::SaveReusableBlock
            | Self::SaveReusableBlockSuccess
            | Self::SaveReusableBlockFailure
            | Self::DeleteReusableBlock
            | Self::DeleteReusableBlockSuccess
            | Self::DeleteReusableBlockFailure
            | Self::ConvertBlockToStatic
            | Self::ConvertBlockToReusable => EventTopic::ReusableBlocks,
        }
    }
}

/// Event topics for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Block list mutations.
    Blocks,
    /// Selection changes.
    Selection,
    /// Template changes and validity.
    Template,
    /// User-facing notices.
    Notices,
    /// Post persistence.
    Posts,
    /// Reusable block persistence.
    ReusableBlocks,
    /// All events (no filtering).
    All,
}

/// Filter over dispatched events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Kinds to include. Empty means all kinds.
    pub kinds: Vec<EventKind>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            kinds: Vec::new(),
        }
    }

    /// Create a filter for specific kinds.
    #[must_use]
    pub fn kinds(kinds: Vec<EventKind>) -> Self {
        Self {
            topics: Vec::new(),
            kinds,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &EditorEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let kind_match = self.kinds.is_empty() || self.kinds.contains(&event.kind());

        topic_match && kind_match
    }
}
