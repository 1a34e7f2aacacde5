//! Phase controller: which action kind is allowed, and for how long.
//!
//! The controller is built when a draft starts, once the player count is
//! final. It holds a schedule of phases with their action budgets:
//!
//! - Ban: `bans_per_round × players` actions (only when starting in Ban)
//! - Pick: `max_selections × players` actions
//!
//! Phases with a zero budget are dropped from the schedule. Turn order
//! runs on a draft-wide action index, so under Snake the seat that bans
//! last also picks first.

use pokedraft_protocol::{DraftPhase, DraftRules, TurnMode};

use crate::turn;

/// What happened to the schedule after an accepted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseOutcome {
    /// Still in the same phase.
    Continue,
    /// The previous phase used up its budget; this is the new one.
    Switched(DraftPhase),
    /// No phase has budget left. The draft is over.
    Exhausted,
}

#[derive(Debug, Clone, Copy)]
struct PhaseBudget {
    phase: DraftPhase,
    budget: usize,
}

/// Tracks the current phase, its action index, and the acting seat.
#[derive(Debug, Clone)]
pub struct PhaseController {
    mode: TurnMode,
    player_count: usize,
    schedule: Vec<PhaseBudget>,
    /// Index into `schedule`. Equal to `schedule.len()` once exhausted.
    cursor: usize,
    /// Actions accepted in the current phase.
    index: usize,
    /// Actions accepted in all earlier phases.
    offset: usize,
    /// Reported once the schedule is exhausted.
    last_phase: DraftPhase,
}

impl PhaseController {
    pub fn new(rules: &DraftRules, player_count: usize) -> Self {
        let mut schedule = Vec::with_capacity(2);
        if rules.starting_phase == DraftPhase::Ban {
            schedule.push(PhaseBudget {
                phase: DraftPhase::Ban,
                budget: rules.bans_per_round as usize * player_count,
            });
        }
        schedule.push(PhaseBudget {
            phase: DraftPhase::Pick,
            budget: rules.max_selections as usize * player_count,
        });
        schedule.retain(|p| p.budget > 0);

        let last_phase = schedule
            .last()
            .map_or(rules.starting_phase, |p| p.phase);

        Self {
            mode: rules.turn_mode,
            player_count,
            schedule,
            cursor: 0,
            index: 0,
            offset: 0,
            last_phase,
        }
    }

    /// The phase currently accepting actions, or `None` once exhausted.
    pub fn active_phase(&self) -> Option<DraftPhase> {
        self.schedule.get(self.cursor).map(|p| p.phase)
    }

    /// The phase to report. Sticks to the final phase after exhaustion.
    pub fn phase(&self) -> DraftPhase {
        self.active_phase().unwrap_or(self.last_phase)
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.schedule.len()
    }

    /// Actions accepted so far across the whole draft.
    pub fn action_count(&self) -> usize {
        self.offset + self.index
    }

    /// Actions left in the current phase.
    pub fn remaining_in_phase(&self) -> usize {
        self.schedule
            .get(self.cursor)
            .map_or(0, |p| p.budget - self.index)
    }

    /// The seat that must take the next action.
    pub fn acting_position(&self) -> Option<usize> {
        if self.is_exhausted() {
            return None;
        }
        turn::acting_position(self.mode, self.player_count, self.action_count())
    }

    /// Records one accepted action and moves the schedule forward.
    pub fn record_action(&mut self) -> PhaseOutcome {
        let Some(current) = self.schedule.get(self.cursor).copied() else {
            return PhaseOutcome::Exhausted;
        };

        self.index += 1;
        if self.index < current.budget {
            return PhaseOutcome::Continue;
        }

        self.offset += current.budget;
        self.index = 0;
        self.cursor += 1;

        match self.active_phase() {
            Some(next) => PhaseOutcome::Switched(next),
            None => PhaseOutcome::Exhausted,
        }
    }
}
