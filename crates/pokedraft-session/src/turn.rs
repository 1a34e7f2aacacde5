//! Turn order engine.
//!
//! Maps an action index to the seat (position in join order) of the
//! player who must act. This is a pure function so it can be tested on
//! its own and replayed: the same inputs always name the same seat.
//!
//! ```text
//! n = 4, RoundRobin:  0 1 2 3 | 0 1 2 3 | 0 1 2 3
//! n = 4, Snake:       0 1 2 3 | 3 2 1 0 | 0 1 2 3
//! ```
//!
//! Under Snake the seat that closes a lap also opens the next one.

use pokedraft_protocol::TurnMode;

/// Returns the seat that takes action number `action_index`.
///
/// `action_index` counts every action of the draft so far, across
/// phases (see [`PhaseController`](crate::PhaseController)). Returns
/// `None` only when there are no players.
pub fn acting_position(mode: TurnMode, player_count: usize, action_index: usize) -> Option<usize> {
    if player_count == 0 {
        return None;
    }

    let lap = action_index / player_count;
    let offset = action_index % player_count;

    let seat = match mode {
        TurnMode::RoundRobin => offset,
        TurnMode::Snake if lap % 2 == 0 => offset,
        TurnMode::Snake => player_count - 1 - offset,
    };
    Some(seat)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(mode: TurnMode, n: usize, len: usize) -> Vec<usize> {
        (0..len)
            .map(|i| acting_position(mode, n, i).unwrap())
            .collect()
    }

    #[test]
    fn test_acting_position_no_players_returns_none() {
        assert_eq!(acting_position(TurnMode::Snake, 0, 0), None);
        assert_eq!(acting_position(TurnMode::RoundRobin, 0, 5), None);
    }

    #[test]
    fn test_acting_position_round_robin_repeats_each_lap() {
        assert_eq!(
            sequence(TurnMode::RoundRobin, 3, 9),
            vec![0, 1, 2, 0, 1, 2, 0, 1, 2]
        );
    }

    #[test]
    fn test_acting_position_snake_repeats_boundary_seat() {
        assert_eq!(
            sequence(TurnMode::Snake, 4, 12),
            vec![0, 1, 2, 3, 3, 2, 1, 0, 0, 1, 2, 3]
        );
    }

    #[test]
    fn test_acting_position_single_player_always_seat_zero() {
        assert_eq!(sequence(TurnMode::Snake, 1, 4), vec![0, 0, 0, 0]);
        assert_eq!(sequence(TurnMode::RoundRobin, 1, 4), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_acting_position_round_robin_period_is_player_count() {
        for n in 1..=8 {
            for i in 0..64 {
                assert_eq!(
                    acting_position(TurnMode::RoundRobin, n, i),
                    acting_position(TurnMode::RoundRobin, n, i + n),
                    "n = {n}, i = {i}"
                );
            }
        }
    }

    #[test]
    fn test_acting_position_snake_lap_end_equals_next_lap_start() {
        for n in 2..=8 {
            for lap in 1..6 {
                let boundary = lap * n;
                assert_eq!(
                    acting_position(TurnMode::Snake, n, boundary - 1),
                    acting_position(TurnMode::Snake, n, boundary),
                    "n = {n}, lap = {lap}"
                );
            }
        }
    }

    #[test]
    fn test_acting_position_every_seat_once_per_lap() {
        for mode in [TurnMode::Snake, TurnMode::RoundRobin] {
            for n in 1..=6 {
                for lap in 0..4 {
                    let mut seats: Vec<usize> = (lap * n..(lap + 1) * n)
                        .map(|i| acting_position(mode, n, i).unwrap())
                        .collect();
                    seats.sort_unstable();
                    assert_eq!(seats, (0..n).collect::<Vec<_>>());
                }
            }
        }
    }
}
