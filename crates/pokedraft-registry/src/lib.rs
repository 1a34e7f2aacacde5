//! Session registry for Pokedraft.
//!
//! Each draft session runs as an isolated Tokio task (actor model) that
//! owns its [`DraftSession`](pokedraft_session::DraftSession). The
//! [`SessionRegistry`] creates sessions from [`Catalog`](pokedraft_catalog::Catalog)
//! references and routes every operation to the right actor.
//!
//! # Key types
//!
//! - [`SessionRegistry`]: create, look up, list, and close sessions
//! - [`SessionHandle`]: send commands to one running session
//! - [`SessionInfo`]: listing row
//! - [`RegistryConfig`]: actor channel sizing

mod actor;
mod config;
mod error;
mod registry;

pub use actor::{SessionHandle, SessionInfo};
pub use config::RegistryConfig;
pub use error::RegistryError;
pub use registry::SessionRegistry;
