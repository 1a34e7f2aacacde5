//! Draft session engine for Pokedraft.
//!
//! - [`acting_position`]: the turn order engine (Snake / RoundRobin)
//! - [`PhaseController`]: Ban and Pick budgets and the switch between them
//! - [`DraftSession`]: the per-session state machine every request goes
//!   through
//!
//! Nothing here is async or shared. The registry crate wraps each
//! session in its own task.

mod draft;
mod error;
mod lifecycle;
mod phase;
mod player;
mod turn;

pub use draft::{DraftSession, JoinedPlayer};
pub use error::DraftError;
pub use lifecycle::pre_start_state;
pub use phase::{PhaseController, PhaseOutcome};
pub use player::{Player, PlayerSecret};
pub use turn::acting_position;
