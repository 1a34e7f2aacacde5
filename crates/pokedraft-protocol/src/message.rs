//! Request/response messages exchanged between clients and the server.
//!
//! Every frame on the wire is an envelope. The client picks a
//! `request_id`; the server echoes it on the matching response so a
//! client can have several requests in flight on one connection.
//!
//! ```text
//! → { "request_id": 7, "request": { "type": "Join", "session_id": 1, "name": "Ash" } }
//! ← { "request_id": 7, "response": { "type": "Joined", "player_id": 3, ... } }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    DraftPhase, DraftRules, DraftSet, DraftSetId, ItemId, Lifecycle, PlayerId, RulesEntry,
    RulesId, SessionId,
};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Everything a client can ask the server to do.
///
/// `#[serde(tag = "type")]` produces internally tagged JSON:
/// `{ "type": "GetUpdate", "session_id": 4 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Create a session from a draft set and a rules preset.
    CreateSession {
        name: String,
        draft_set: DraftSetId,
        draft_rules: RulesId,
        min_players: usize,
        max_players: usize,
    },

    /// Join a session. The reply carries the player's secret, once.
    Join { session_id: SessionId, name: String },

    /// Flip the caller's ready flag.
    ToggleReady {
        session_id: SessionId,
        player_id: PlayerId,
        secret: String,
    },

    /// Start the draft. Any ready player may do this.
    Start {
        session_id: SessionId,
        player_id: PlayerId,
        secret: String,
    },

    /// Ban or pick an item.
    SelectItem {
        session_id: SessionId,
        player_id: PlayerId,
        secret: String,
        item_id: ItemId,
        action: DraftPhase,
    },

    /// Read-only projection of a session.
    GetUpdate { session_id: SessionId },

    /// List the draft sets the catalog knows about.
    ListDraftSets,

    /// List the rules presets the catalog knows about.
    ListDraftRules,
}

/// Wrapper for every client → server frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientEnvelope {
    /// Echoed back on the response.
    pub request_id: u64,
    pub request: Request,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// The result of a successful `SelectItem`.
///
/// `phase` is the phase *after* the action was applied, so the ban that
/// closes the Ban phase already reports `Pick`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub phase: DraftPhase,
    pub banned_items: Vec<ItemId>,
    /// The acting player's own picks.
    pub selected_items: Vec<ItemId>,
}

/// One player as seen by everyone. The secret is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub selections: Vec<ItemId>,
    pub ready: bool,
}

/// Read-only projection of a whole session (the "update" view).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftUpdate {
    pub session_id: SessionId,
    pub name: String,
    pub current_phase: DraftPhase,
    pub banned_items: Vec<ItemId>,
    /// Name of the player whose turn it is. `None` unless in progress.
    pub current_player: Option<String>,
    pub state: Lifecycle,
    pub players: Vec<PlayerView>,
}

/// Distinguishable error categories.
///
/// Clients branch on this, not on the message text. `Unauthorized` and
/// `NotYourTurn` stay separate on purpose: one means "wrong secret", the
/// other "wait for your turn".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCategory {
    InvalidConfiguration,
    SessionNotFound,
    SessionNotJoinable,
    SessionFull,
    NameTaken,
    NotFound,
    DraftNotReady,
    AlreadyStarted,
    Unauthorized,
    DraftNotStarted,
    ActionNotAllowed,
    NotYourTurn,
    ItemUnavailable,
    BadRequest,
    Unavailable,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Everything the server can answer with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    SessionCreated {
        session_id: SessionId,
    },

    /// The new player's identity. `secret` is only ever sent here.
    Joined {
        session_id: SessionId,
        player_id: PlayerId,
        name: String,
        secret: String,
        ready: bool,
    },

    /// Generic acknowledgement (toggle ready, start).
    Ack {
        message: String,
    },

    Selection(Selection),

    Update(DraftUpdate),

    DraftSets {
        sets: Vec<DraftSet>,
    },

    DraftRules {
        rules: Vec<RulesEntry>,
    },

    Error {
        category: ErrorCategory,
        message: String,
    },
}

impl Response {
    /// Builds an `Error` response.
    pub fn error(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self::Error {
            category,
            message: message.into(),
        }
    }
}

/// Wrapper for every server → client frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEnvelope {
    /// The `request_id` of the request this answers. 0 when the request
    /// could not be decoded at all.
    pub request_id: u64,
    pub response: Response,
}

/// Convenience for building preset lists without spelling out the
/// entry struct.
impl From<(RulesId, DraftRules)> for RulesEntry {
    fn from((id, rules): (RulesId, DraftRules)) -> Self {
        Self { id, rules }
    }
}
