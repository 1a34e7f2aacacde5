//! Stock rules presets and the debug draft set.

use pokedraft_protocol::{DraftPhase, DraftRules, ItemId, TurnMode};

/// Name of the small draft set used for local play and tests.
pub const DEBUG_SET_NAME: &str = "Debug Set";

/// Items of the debug set: Pokédex numbers 1 through 9.
pub fn debug_set_items() -> Vec<ItemId> {
    (1..10).map(ItemId).collect()
}

/// The rules presets every fresh catalog starts with, in id order.
pub fn rule_presets() -> Vec<DraftRules> {
    let mut presets = Vec::with_capacity(6);
    for (label, bans, max) in [("Showdown", 3, 6), ("Nuzlocke", 2, 15), ("Integration Test", 1, 1)] {
        for (suffix, turn_mode) in [("Snake", TurnMode::Snake), ("Round Robin", TurnMode::RoundRobin)] {
            presets.push(DraftRules {
                name: format!("{label} {suffix}"),
                picks_per_round: 1,
                bans_per_round: bans,
                max_selections: max,
                starting_phase: DraftPhase::Ban,
                turn_mode,
            });
        }
    }
    presets
}
