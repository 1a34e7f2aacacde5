//! Integration tests for the session registry against the seeded catalog.

use std::sync::Arc;

use pokedraft_catalog::MemoryCatalog;
use pokedraft_protocol::{
    DraftPhase, DraftSetId, ErrorCategory, ItemId, Lifecycle, RulesId, SessionId,
};
use pokedraft_registry::{RegistryConfig, RegistryError, SessionRegistry};
use pokedraft_session::JoinedPlayer;

// =========================================================================
// Helpers
// =========================================================================

/// Seeded preset "Integration Test Snake": 1 ban, 1 pick, Snake.
const SNAKE_1_1: RulesId = RulesId(5);
const DEBUG_SET: DraftSetId = DraftSetId(1);

fn registry() -> SessionRegistry<MemoryCatalog> {
    SessionRegistry::new(Arc::new(MemoryCatalog::seeded()), RegistryConfig::default())
}

/// Creates a session, joins `n` players, readies them all, and starts.
async fn started(
    reg: &SessionRegistry<MemoryCatalog>,
    n: usize,
) -> (SessionId, Vec<JoinedPlayer>) {
    let sid = reg
        .create_session("TEST 1", DEBUG_SET, SNAKE_1_1, n, n)
        .await
        .unwrap();
    let mut players = Vec::new();
    for i in 1..=n {
        players.push(reg.join(sid, format!("Player {i}")).await.unwrap());
    }
    for p in &players {
        reg.toggle_ready(sid, p.id, p.secret.expose()).await.unwrap();
    }
    reg.start(sid, players[0].id, players[0].secret.expose())
        .await
        .unwrap();
    (sid, players)
}

fn category<T: std::fmt::Debug>(result: Result<T, RegistryError>) -> ErrorCategory {
    result.unwrap_err().category()
}

// =========================================================================
// Creation
// =========================================================================

#[tokio::test]
async fn test_create_session_returns_unique_ids() {
    let reg = registry();
    let a = reg.create_session("a", DEBUG_SET, SNAKE_1_1, 2, 4).await.unwrap();
    let b = reg.create_session("b", DEBUG_SET, SNAKE_1_1, 2, 4).await.unwrap();

    assert_ne!(a, b);
    assert_eq!(reg.session_count().await, 2);
}

#[tokio::test]
async fn test_create_session_unknown_set_is_invalid_configuration() {
    let reg = registry();
    let result = reg.create_session("x", DraftSetId(99), SNAKE_1_1, 2, 4).await;
    assert_eq!(category(result), ErrorCategory::InvalidConfiguration);
    assert_eq!(reg.session_count().await, 0);
}

#[tokio::test]
async fn test_create_session_unknown_rules_is_invalid_configuration() {
    let reg = registry();
    let result = reg.create_session("x", DEBUG_SET, RulesId(99), 2, 4).await;
    assert_eq!(category(result), ErrorCategory::InvalidConfiguration);
}

#[tokio::test]
async fn test_create_session_min_above_max_is_invalid_configuration() {
    let reg = registry();
    let result = reg.create_session("x", DEBUG_SET, SNAKE_1_1, 5, 2).await;
    assert_eq!(category(result), ErrorCategory::InvalidConfiguration);
}

#[tokio::test]
async fn test_unknown_session_returns_session_not_found() {
    let reg = registry();
    assert_eq!(
        category(reg.join(SessionId(42), "Ash").await),
        ErrorCategory::SessionNotFound
    );
    assert_eq!(
        category(reg.update(SessionId(42)).await),
        ErrorCategory::SessionNotFound
    );
}

// =========================================================================
// Lobby
// =========================================================================

#[tokio::test]
async fn test_join_and_ready_reported_in_update() {
    let reg = registry();
    let sid = reg.create_session("lobby", DEBUG_SET, SNAKE_1_1, 2, 3).await.unwrap();

    let ash = reg.join(sid, "Ash").await.unwrap();
    let misty = reg.join(sid, "Misty").await.unwrap();
    assert!(reg.toggle_ready(sid, ash.id, ash.secret.expose()).await.unwrap());

    let update = reg.update(sid).await.unwrap();
    assert_eq!(update.state, Lifecycle::Open);
    assert_eq!(update.players.len(), 2);
    assert!(update.players[0].ready);

    reg.toggle_ready(sid, misty.id, misty.secret.expose()).await.unwrap();
    assert_eq!(reg.update(sid).await.unwrap().state, Lifecycle::Ready);
}

#[tokio::test]
async fn test_join_full_and_duplicate_name() {
    let reg = registry();
    let sid = reg.create_session("small", DEBUG_SET, SNAKE_1_1, 1, 2).await.unwrap();

    reg.join(sid, "Ash").await.unwrap();
    assert_eq!(category(reg.join(sid, "Ash").await), ErrorCategory::NameTaken);
    reg.join(sid, "Misty").await.unwrap();
    assert_eq!(category(reg.join(sid, "Brock").await), ErrorCategory::SessionFull);
}

#[tokio::test]
async fn test_start_before_ready_is_draft_not_ready() {
    let reg = registry();
    let sid = reg.create_session("early", DEBUG_SET, SNAKE_1_1, 2, 2).await.unwrap();
    let ash = reg.join(sid, "Ash").await.unwrap();

    let result = reg.start(sid, ash.id, ash.secret.expose()).await;
    assert_eq!(category(result), ErrorCategory::DraftNotReady);
}

// =========================================================================
// Drafting
// =========================================================================

#[tokio::test]
async fn test_four_player_snake_draft_through_registry() {
    let reg = registry();
    let (sid, p) = started(&reg, 4).await;

    for (seat, item) in [(0, 1), (1, 2), (2, 3), (3, 4)] {
        reg.select_item(sid, p[seat].id, p[seat].secret.expose(), ItemId(item), DraftPhase::Ban)
            .await
            .unwrap();
    }

    let wrong_action = reg
        .select_item(sid, p[0].id, p[0].secret.expose(), ItemId(5), DraftPhase::Ban)
        .await;
    assert_eq!(category(wrong_action), ErrorCategory::ActionNotAllowed);

    let wrong_turn = reg
        .select_item(sid, p[0].id, p[0].secret.expose(), ItemId(5), DraftPhase::Pick)
        .await;
    assert_eq!(category(wrong_turn), ErrorCategory::NotYourTurn);

    let sel = reg
        .select_item(sid, p[3].id, p[3].secret.expose(), ItemId(5), DraftPhase::Pick)
        .await
        .unwrap();
    assert_eq!(sel.selected_items, vec![ItemId(5)]);

    let update = reg.update(sid).await.unwrap();
    assert_eq!(update.current_phase, DraftPhase::Pick);
    assert_eq!(update.banned_items, vec![ItemId(1), ItemId(2), ItemId(3), ItemId(4)]);
    assert_eq!(update.current_player.as_deref(), Some("Player 3"));
    assert_eq!(update.state, Lifecycle::InProgress);
}

#[tokio::test]
async fn test_seeded_nuzlocke_on_debug_set_ends_when_pool_runs_out() {
    let reg = registry();
    // "Nuzlocke Snake" wants 2 bans and 15 picks each; the Debug Set has 9 items.
    let sid = reg
        .create_session("nuzlocke", DEBUG_SET, RulesId(3), 2, 2)
        .await
        .unwrap();
    let mut players = Vec::new();
    for i in 1..=2 {
        players.push(reg.join(sid, format!("Player {i}")).await.unwrap());
    }
    for p in &players {
        reg.toggle_ready(sid, p.id, p.secret.expose()).await.unwrap();
    }
    reg.start(sid, players[0].id, players[0].secret.expose())
        .await
        .unwrap();

    for item in 1..=9 {
        let update = reg.update(sid).await.unwrap();
        let current = update.current_player.expect("draft still running");
        let p = players.iter().find(|p| p.name == current).unwrap();
        reg.select_item(sid, p.id, p.secret.expose(), ItemId(item), update.current_phase)
            .await
            .unwrap();
    }

    let update = reg.update(sid).await.unwrap();
    assert_eq!(update.state, Lifecycle::Ended);
    assert_eq!(update.current_player, None);
    assert_eq!(update.banned_items.len(), 4);
}

#[tokio::test]
async fn test_three_player_snake_draft_ends() {
    let reg = registry();
    let (sid, p) = started(&reg, 3).await;

    for (seat, item) in [(0, 1), (1, 2), (2, 3)] {
        reg.select_item(sid, p[seat].id, p[seat].secret.expose(), ItemId(item), DraftPhase::Ban)
            .await
            .unwrap();
    }
    for (seat, item) in [(2, 4), (1, 5), (0, 6)] {
        reg.select_item(sid, p[seat].id, p[seat].secret.expose(), ItemId(item), DraftPhase::Pick)
            .await
            .unwrap();
    }

    assert_eq!(reg.update(sid).await.unwrap().state, Lifecycle::Ended);
    let late = reg
        .select_item(sid, p[0].id, p[0].secret.expose(), ItemId(7), DraftPhase::Ban)
        .await;
    assert_eq!(category(late), ErrorCategory::DraftNotStarted);
}

#[tokio::test]
async fn test_wrong_secret_is_unauthorized_not_turn_error() {
    let reg = registry();
    let (sid, p) = started(&reg, 2).await;

    let result = reg
        .select_item(sid, p[1].id, p[0].secret.expose(), ItemId(1), DraftPhase::Ban)
        .await;
    assert_eq!(category(result), ErrorCategory::Unauthorized);
}

// =========================================================================
// Concurrency
// =========================================================================

#[tokio::test]
async fn test_concurrent_bans_accept_exactly_one() {
    let reg = Arc::new(registry());
    let (sid, p) = started(&reg, 2).await;

    // Both seats race to ban the same item; only seat 0 may act, and the
    // item can only be consumed once.
    let mut tasks = Vec::new();
    for player in p.clone() {
        let reg = Arc::clone(&reg);
        tasks.push(tokio::spawn(async move {
            reg.select_item(sid, player.id, player.secret.expose(), ItemId(1), DraftPhase::Ban)
                .await
        }));
    }

    let mut accepted = 0;
    for task in tasks {
        if task.await.unwrap().is_ok() {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 1);
    assert_eq!(reg.update(sid).await.unwrap().banned_items, vec![ItemId(1)]);
}

#[tokio::test]
async fn test_concurrent_creates_all_registered() {
    let reg = Arc::new(registry());
    let mut tasks = Vec::new();
    for i in 0..16 {
        let reg = Arc::clone(&reg);
        tasks.push(tokio::spawn(async move {
            reg.create_session(format!("s{i}"), DEBUG_SET, SNAKE_1_1, 1, 4).await
        }));
    }

    let mut ids = Vec::new();
    for task in tasks {
        ids.push(task.await.unwrap().unwrap());
    }
    ids.sort_by_key(|id| id.0);
    ids.dedup();

    assert_eq!(ids.len(), 16);
    assert_eq!(reg.session_count().await, 16);
    for id in ids {
        assert!(reg.update(id).await.is_ok());
    }
}

#[tokio::test]
async fn test_read_your_writes_after_join() {
    let reg = registry();
    let sid = reg.create_session("ryw", DEBUG_SET, SNAKE_1_1, 1, 8).await.unwrap();

    for i in 0..8 {
        reg.join(sid, format!("P{i}")).await.unwrap();
        assert_eq!(reg.update(sid).await.unwrap().players.len(), i + 1);
    }
}

// =========================================================================
// Listing and teardown
// =========================================================================

#[tokio::test]
async fn test_list_sessions_reports_info() {
    let reg = registry();
    let a = reg.create_session("first", DEBUG_SET, SNAKE_1_1, 2, 4).await.unwrap();
    let b = reg.create_session("second", DEBUG_SET, SNAKE_1_1, 1, 3).await.unwrap();
    reg.join(b, "Ash").await.unwrap();

    let list = reg.list_sessions().await;
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].session_id, a);
    assert_eq!(list[0].name, "first");
    assert_eq!(list[1].player_count, 1);
    assert_eq!(list[1].max_players, 3);
    assert_eq!(list[1].state, Lifecycle::Open);
}

#[tokio::test]
async fn test_close_session_removes_it() {
    let reg = registry();
    let sid = reg.create_session("gone", DEBUG_SET, SNAKE_1_1, 1, 2).await.unwrap();
    let handle = reg.handle(sid).await.unwrap();

    reg.close_session(sid).await.unwrap();

    assert_eq!(reg.session_count().await, 0);
    assert_eq!(category(reg.update(sid).await), ErrorCategory::SessionNotFound);
    assert_eq!(category(reg.close_session(sid).await), ErrorCategory::SessionNotFound);

    // A stale handle sees the actor as gone.
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert_eq!(category(handle.snapshot().await), ErrorCategory::Unavailable);
}

#[tokio::test]
async fn test_shutdown_applies_commands_queued_before_it() {
    let reg = registry();
    let sid = reg.create_session("fifo", DEBUG_SET, SNAKE_1_1, 1, 2).await.unwrap();
    let handle = reg.handle(sid).await.unwrap();

    // Polling once puts the join on the channel; the actor has not run yet.
    let mut join = Box::pin(handle.join("Ash".into()));
    tokio::select! {
        biased;
        _ = &mut join => panic!("actor replied before yielding"),
        _ = std::future::ready(()) => {}
    }
    handle.shutdown().await.unwrap();

    let joined = join.await.unwrap();
    assert_eq!(joined.name, "Ash");
    assert_eq!(category(handle.snapshot().await), ErrorCategory::Unavailable);
}

#[tokio::test]
async fn test_catalog_listings_pass_through() {
    let reg = registry();
    assert_eq!(reg.draft_sets().await.unwrap().len(), 1);
    assert_eq!(reg.draft_rules().await.unwrap().len(), 6);
}
