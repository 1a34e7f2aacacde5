//! Pre-start readiness rule.

use pokedraft_protocol::Lifecycle;

use crate::Player;

/// The reported state of a session that has not started yet.
///
/// `Ready` iff at least `min_players` have joined and every one of them
/// is ready. An empty session is never ready.
pub fn pre_start_state(players: &[Player], min_players: usize) -> Lifecycle {
    let enough = !players.is_empty() && players.len() >= min_players;
    if enough && players.iter().all(|p| p.ready) {
        Lifecycle::Ready
    } else {
        Lifecycle::Open
    }
}

#[cfg(test)]
mod tests {
    use pokedraft_protocol::PlayerId;

    use super::*;

    fn players(ready: &[bool]) -> Vec<Player> {
        ready
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let mut p = Player::new(PlayerId(i as u64 + 1), format!("Player {i}"));
                p.ready = *r;
                p
            })
            .collect()
    }

    #[test]
    fn test_pre_start_state_all_ready_and_enough_is_ready() {
        assert_eq!(pre_start_state(&players(&[true, true]), 2), Lifecycle::Ready);
    }

    #[test]
    fn test_pre_start_state_too_few_is_open() {
        assert_eq!(pre_start_state(&players(&[true]), 2), Lifecycle::Open);
    }

    #[test]
    fn test_pre_start_state_one_unready_is_open() {
        assert_eq!(pre_start_state(&players(&[true, false, true]), 2), Lifecycle::Open);
    }

    #[test]
    fn test_pre_start_state_empty_is_open() {
        assert_eq!(pre_start_state(&[], 0), Lifecycle::Open);
    }
}
