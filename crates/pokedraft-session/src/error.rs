//! Error types for the draft session layer.

use pokedraft_protocol::{DraftPhase, ErrorCategory, ItemId, Lifecycle, PlayerId};

/// Every way a session operation can be rejected.
///
/// A rejected operation never changes the session.
#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("session is not joinable while {0}")]
    SessionNotJoinable(Lifecycle),

    #[error("no slots available ({0} players max)")]
    SessionFull(usize),

    #[error("username {0:?} already in use")]
    NameTaken(String),

    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("draft is not ready: every player must be ready and at least {0} must have joined")]
    DraftNotReady(usize),

    #[error("draft has already started")]
    AlreadyStarted,

    /// Wrong secret, or no such player in this session.
    #[error("access denied")]
    Unauthorized,

    #[error("draft is not in progress ({0})")]
    DraftNotStarted(Lifecycle),

    #[error("current action not allowed: {requested} during the {current} phase")]
    ActionNotAllowed {
        requested: DraftPhase,
        current: DraftPhase,
    },

    #[error("it is not your turn")]
    NotYourTurn,

    #[error("item {0} is not available")]
    ItemUnavailable(ItemId),
}

impl DraftError {
    /// The wire category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfiguration(_) => ErrorCategory::InvalidConfiguration,
            Self::SessionNotJoinable(_) => ErrorCategory::SessionNotJoinable,
            Self::SessionFull(_) => ErrorCategory::SessionFull,
            Self::NameTaken(_) => ErrorCategory::NameTaken,
            Self::PlayerNotFound(_) => ErrorCategory::NotFound,
            Self::DraftNotReady(_) => ErrorCategory::DraftNotReady,
            Self::AlreadyStarted => ErrorCategory::AlreadyStarted,
            Self::Unauthorized => ErrorCategory::Unauthorized,
            Self::DraftNotStarted(_) => ErrorCategory::DraftNotStarted,
            Self::ActionNotAllowed { .. } => ErrorCategory::ActionNotAllowed,
            Self::NotYourTurn => ErrorCategory::NotYourTurn,
            Self::ItemUnavailable(_) => ErrorCategory::ItemUnavailable,
        }
    }
}
