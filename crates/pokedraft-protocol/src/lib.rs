//! Wire protocol for Pokedraft.
//!
//! Everything that crosses a process boundary lives here: identifier
//! newtypes, the draft vocabulary (phases, turn modes, lifecycle, rules
//! and sets), request/response envelopes, and the codec that turns them
//! into bytes. This crate knows nothing about sessions or sockets.
//!
//! ```text
//! WebSocket frame → Codec → ClientEnvelope → registry/session → ServerEnvelope → Codec
//! ```

mod codec;
mod draft;
mod error;
mod ids;
mod message;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use draft::{DraftPhase, DraftRules, DraftSet, Lifecycle, RulesEntry, TurnMode};
pub use error::ProtocolError;
pub use ids::{DraftSetId, ItemId, PlayerId, RulesId, SessionId};
pub use message::{
    ClientEnvelope, DraftUpdate, ErrorCategory, PlayerView, Request, Response, Selection,
    ServerEnvelope,
};
