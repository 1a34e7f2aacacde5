//! Draft vocabulary: phases, turn modes, lifecycle, and the catalog records
//! (draft sets and rules) that a session is created from.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{DraftSetId, ItemId, RulesId};

// ---------------------------------------------------------------------------
// DraftPhase / TurnMode
// ---------------------------------------------------------------------------

/// The action kind currently enforced for the whole session.
///
/// A ban removes an item from the pool without giving it to anyone; a
/// pick assigns it to the acting player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DraftPhase {
    Ban,
    Pick,
}

impl fmt::Display for DraftPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ban => write!(f, "Ban"),
            Self::Pick => write!(f, "Pick"),
        }
    }
}

/// How the acting player advances from one action to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnMode {
    /// 0,1,…,n-1 then 0,1,…,n-1 again.
    RoundRobin,
    /// 0,1,…,n-1 then n-1,…,1,0 then forward again. The player closing a
    /// lap also opens the next one.
    Snake,
}

impl fmt::Display for TurnMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoundRobin => write!(f, "RoundRobin"),
            Self::Snake => write!(f, "Snake"),
        }
    }
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// The lifecycle state of a draft session.
///
/// ```text
/// Open ⇄ Ready ──(start)──→ InProgress ──(budget spent)──→ Ended
/// ```
///
/// `Open` and `Ready` are both pre-start states: `Ready` is only reported
/// while enough players have joined and every one of them is ready. More
/// players may still join and toggle readiness, which can flip the state
/// back to `Open`. `Ended` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    Open,
    Ready,
    InProgress,
    Ended,
}

impl Lifecycle {
    /// Returns `true` while new players may join.
    pub fn is_joinable(&self) -> bool {
        matches!(self, Self::Open | Self::Ready)
    }

    /// Returns `true` once the draft has been started (running or over).
    pub fn has_started(&self) -> bool {
        matches!(self, Self::InProgress | Self::Ended)
    }

    /// Returns `true` while bans and picks are accepted.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::InProgress)
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::Ready => write!(f, "Ready"),
            Self::InProgress => write!(f, "InProgress"),
            Self::Ended => write!(f, "Ended"),
        }
    }
}

// ---------------------------------------------------------------------------
// DraftRules
// ---------------------------------------------------------------------------

/// An immutable rules preset. A session copies it at creation time.
///
/// `bans_per_round` is a per-player count: the Ban phase lasts
/// `bans_per_round × player_count` actions. `max_selections` is the number
/// of picks each player ends with. `picks_per_round` is carried for
/// clients and validated, but every turn is a single action.
///
/// The aliases accept the field names used by the original data importer
/// (`max_pokemon`, `turn_type`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRules {
    pub name: String,
    pub picks_per_round: u32,
    pub bans_per_round: u32,
    #[serde(alias = "max_pokemon")]
    pub max_selections: u32,
    pub starting_phase: DraftPhase,
    #[serde(alias = "turn_type")]
    pub turn_mode: TurnMode,
}

impl DraftRules {
    /// Checks that the preset describes a draft that can actually run.
    ///
    /// Returns a human-readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.bans_per_round == 0 && self.max_selections == 0 {
            return Err("rules allow neither bans nor picks".into());
        }
        if self.max_selections > 0 && self.picks_per_round == 0 {
            return Err("picks_per_round must be at least 1".into());
        }
        if self.starting_phase == DraftPhase::Pick && self.bans_per_round > 0 {
            return Err(
                "bans_per_round must be 0 when the draft starts in the Pick phase".into(),
            );
        }
        Ok(())
    }
}

/// A rules preset together with its catalog reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesEntry {
    pub id: RulesId,
    pub rules: DraftRules,
}

// ---------------------------------------------------------------------------
// DraftSet
// ---------------------------------------------------------------------------

/// An immutable, ordered pool of selectable items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSet {
    pub id: DraftSetId,
    pub name: String,
    pub items: Vec<ItemId>,
}
