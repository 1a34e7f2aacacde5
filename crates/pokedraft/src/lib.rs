//! # Pokedraft
//!
//! A server for multiplayer ban/pick drafts. Players join a session,
//! ready up, and take turns banning and picking items from a shared pool
//! under Snake or RoundRobin order, each action authorized by a
//! per-player secret.
//!
//! ```text
//! WebSocket (this crate) → protocol (envelopes) → registry (actor per session)
//!                                                   → session (state machine)
//!                                                   → catalog (sets & rules)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pokedraft::prelude::*;
//!
//! # async fn run() -> Result<(), PokedraftError> {
//! let server = PokedraftServerBuilder::new()
//!     .bind("0.0.0.0:8080")
//!     .build(MemoryCatalog::seeded())
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
mod server;
mod transport;

pub use error::PokedraftError;
pub use server::{PokedraftServer, PokedraftServerBuilder, ServerConfig};
pub use transport::{ConnectionId, TransportError};

/// Everything needed to run a server or talk to one.
pub mod prelude {
    pub use crate::{PokedraftError, PokedraftServer, PokedraftServerBuilder, ServerConfig};
    pub use pokedraft_catalog::{Catalog, CatalogError, MemoryCatalog};
    pub use pokedraft_protocol::{
        ClientEnvelope, Codec, DraftPhase, DraftRules, DraftSet, DraftSetId, DraftUpdate,
        ErrorCategory, ItemId, JsonCodec, Lifecycle, PlayerId, PlayerView, Request, Response,
        RulesEntry, RulesId, Selection, ServerEnvelope, SessionId, TurnMode,
    };
    pub use pokedraft_registry::{RegistryConfig, RegistryError, SessionInfo, SessionRegistry};
    pub use pokedraft_session::DraftError;
}
