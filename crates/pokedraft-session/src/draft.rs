//! The draft session state machine.
//!
//! A [`DraftSession`] owns everything about one draft: its players, the
//! rules snapshot, the item pool, bans, picks, and the phase controller.
//! It is plain synchronous state. Serializing access to it is the job of
//! the layer above (one actor task per session).

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use pokedraft_protocol::{
    DraftPhase, DraftRules, DraftSet, DraftSetId, DraftUpdate, ItemId, Lifecycle, PlayerId,
    Selection, SessionId,
};

use crate::lifecycle::pre_start_state;
use crate::phase::{PhaseController, PhaseOutcome};
use crate::{DraftError, Player, PlayerSecret};

/// Player ids are unique process-wide, not just per session.
static NEXT_PLAYER_ID: AtomicU64 = AtomicU64::new(1);

/// What a successful join hands back. The only place the secret leaves
/// the session.
#[derive(Debug, Clone)]
pub struct JoinedPlayer {
    pub id: PlayerId,
    pub name: String,
    pub secret: PlayerSecret,
    pub ready: bool,
}

/// One draft session.
///
/// ```text
/// new() → join()* → toggle_ready()* → start() → select_item()* → Ended
///                                                 snapshot() at any time
/// ```
#[derive(Debug)]
pub struct DraftSession {
    id: SessionId,
    name: String,
    draft_set: DraftSetId,
    rules: DraftRules,
    pool: HashSet<ItemId>,
    /// Items banned or picked so far.
    consumed: HashSet<ItemId>,
    min_players: usize,
    max_players: usize,
    players: Vec<Player>,
    lifecycle: Lifecycle,
    current_phase: DraftPhase,
    banned_items: Vec<ItemId>,
    /// Built by `start()`, once the player count is final.
    controller: Option<PhaseController>,
}

impl DraftSession {
    /// Creates an `Open` session with no players.
    ///
    /// # Errors
    /// [`DraftError::InvalidConfiguration`] if `min_players > max_players`,
    /// `max_players == 0`, the rules fail validation, or the draft set is
    /// empty.
    pub fn new(
        id: SessionId,
        name: impl Into<String>,
        draft_set: &DraftSet,
        rules: DraftRules,
        min_players: usize,
        max_players: usize,
    ) -> Result<Self, DraftError> {
        if max_players == 0 {
            return Err(DraftError::InvalidConfiguration(
                "max_players must be at least 1".into(),
            ));
        }
        if min_players > max_players {
            return Err(DraftError::InvalidConfiguration(format!(
                "min_players ({min_players}) exceeds max_players ({max_players})"
            )));
        }
        rules.validate().map_err(DraftError::InvalidConfiguration)?;
        if draft_set.items.is_empty() {
            return Err(DraftError::InvalidConfiguration(format!(
                "draft set {} has no items",
                draft_set.id
            )));
        }

        Ok(Self {
            id,
            name: name.into(),
            draft_set: draft_set.id,
            current_phase: rules.starting_phase,
            rules,
            pool: draft_set.items.iter().copied().collect(),
            consumed: HashSet::new(),
            min_players,
            max_players,
            players: Vec::new(),
            lifecycle: Lifecycle::Open,
            banned_items: Vec::new(),
            controller: None,
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn draft_set(&self) -> DraftSetId {
        self.draft_set
    }

    pub fn rules(&self) -> &DraftRules {
        &self.rules
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn current_phase(&self) -> DraftPhase {
        self.current_phase
    }

    /// Bans in the order they were made.
    pub fn banned_items(&self) -> &[ItemId] {
        &self.banned_items
    }

    /// Players in join order (seat order).
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn min_players(&self) -> usize {
        self.min_players
    }

    pub fn max_players(&self) -> usize {
        self.max_players
    }

    /// The player whose turn it is. `None` unless the draft is running.
    pub fn current_player(&self) -> Option<&Player> {
        if !self.lifecycle.is_active() {
            return None;
        }
        let seat = self.controller.as_ref()?.acting_position()?;
        self.players.get(seat)
    }

    /// Adds a player at the next seat and issues their secret.
    ///
    /// # Errors
    /// - [`DraftError::SessionNotJoinable`] once the draft has started
    /// - [`DraftError::SessionFull`] when every seat is taken
    /// - [`DraftError::NameTaken`] if another player already uses `name`
    pub fn join(&mut self, name: impl Into<String>) -> Result<JoinedPlayer, DraftError> {
        let name = name.into();
        if !self.lifecycle.is_joinable() {
            return Err(DraftError::SessionNotJoinable(self.lifecycle));
        }
        if self.players.len() >= self.max_players {
            return Err(DraftError::SessionFull(self.max_players));
        }
        if self.players.iter().any(|p| p.name == name) {
            return Err(DraftError::NameTaken(name));
        }

        let id = PlayerId(NEXT_PLAYER_ID.fetch_add(1, Ordering::Relaxed));
        let player = Player::new(id, name);
        let joined = JoinedPlayer {
            id,
            name: player.name.clone(),
            secret: player.secret.clone(),
            ready: player.ready,
        };
        self.players.push(player);
        self.lifecycle = pre_start_state(&self.players, self.min_players);

        tracing::info!(
            session_id = %self.id,
            player_id = %id,
            players = self.players.len(),
            "player joined"
        );
        Ok(joined)
    }

    /// Flips the player's ready flag and returns the new value.
    ///
    /// # Errors
    /// [`DraftError::PlayerNotFound`], [`DraftError::Unauthorized`], or
    /// [`DraftError::AlreadyStarted`] once the draft is running.
    pub fn toggle_ready(&mut self, player_id: PlayerId, secret: &str) -> Result<bool, DraftError> {
        let seat = self.seat_of(player_id).ok_or(DraftError::PlayerNotFound(player_id))?;
        self.authorize(seat, secret)?;
        if self.lifecycle.has_started() {
            return Err(DraftError::AlreadyStarted);
        }

        let player = &mut self.players[seat];
        player.ready = !player.ready;
        let ready = player.ready;
        self.lifecycle = pre_start_state(&self.players, self.min_players);

        tracing::debug!(
            session_id = %self.id,
            %player_id,
            ready,
            state = %self.lifecycle,
            "ready toggled"
        );
        Ok(ready)
    }

    /// Starts the draft. Any player may do it once the session is `Ready`.
    ///
    /// # Errors
    /// [`DraftError::PlayerNotFound`], [`DraftError::Unauthorized`],
    /// [`DraftError::AlreadyStarted`], or [`DraftError::DraftNotReady`].
    pub fn start(&mut self, player_id: PlayerId, secret: &str) -> Result<(), DraftError> {
        let seat = self.seat_of(player_id).ok_or(DraftError::PlayerNotFound(player_id))?;
        self.authorize(seat, secret)?;
        if self.lifecycle.has_started() {
            return Err(DraftError::AlreadyStarted);
        }
        if pre_start_state(&self.players, self.min_players) != Lifecycle::Ready {
            return Err(DraftError::DraftNotReady(self.min_players.max(1)));
        }

        let controller = PhaseController::new(&self.rules, self.players.len());
        self.current_phase = controller.phase();
        self.controller = Some(controller);
        self.lifecycle = Lifecycle::InProgress;

        tracing::info!(
            session_id = %self.id,
            %player_id,
            players = self.players.len(),
            phase = %self.current_phase,
            "draft started"
        );
        Ok(())
    }

    /// Bans or picks `item` on behalf of `player_id`.
    ///
    /// Checks run in this order and the first failure wins:
    ///
    /// 1. the draft is in progress, else [`DraftError::DraftNotStarted`]
    /// 2. the secret matches, else [`DraftError::Unauthorized`]
    /// 3. `action` is the current phase, else [`DraftError::ActionNotAllowed`]
    /// 4. it is this player's turn, else [`DraftError::NotYourTurn`]
    /// 5. the item is in the pool and unused, else [`DraftError::ItemUnavailable`]
    ///
    /// The draft ends when the phase budgets are spent or when the last
    /// item of the pool is consumed, whichever comes first.
    ///
    /// Returns the phase after the action, all bans so far, and the
    /// caller's own picks.
    pub fn select_item(
        &mut self,
        player_id: PlayerId,
        secret: &str,
        item: ItemId,
        action: DraftPhase,
    ) -> Result<Selection, DraftError> {
        if !self.lifecycle.is_active() {
            return Err(DraftError::DraftNotStarted(self.lifecycle));
        }
        let seat = self.seat_of(player_id).ok_or(DraftError::Unauthorized)?;
        self.authorize(seat, secret)?;

        let Some(controller) = self.controller.as_mut() else {
            return Err(DraftError::DraftNotStarted(self.lifecycle));
        };
        let current = controller.phase();
        if action != current {
            return Err(DraftError::ActionNotAllowed {
                requested: action,
                current,
            });
        }
        if controller.acting_position() != Some(seat) {
            return Err(DraftError::NotYourTurn);
        }
        if !self.pool.contains(&item) || self.consumed.contains(&item) {
            return Err(DraftError::ItemUnavailable(item));
        }

        self.consumed.insert(item);
        match action {
            DraftPhase::Ban => self.banned_items.push(item),
            DraftPhase::Pick => self.players[seat].selections.push(item),
        }
        let outcome = controller.record_action();
        tracing::info!(
            session_id = %self.id,
            %player_id,
            %item,
            %action,
            remaining = controller.remaining_in_phase(),
            "item selected"
        );

        match outcome {
            PhaseOutcome::Continue => {}
            PhaseOutcome::Switched(next) => {
                tracing::info!(session_id = %self.id, phase = %next, "phase switched");
            }
            PhaseOutcome::Exhausted => {
                self.lifecycle = Lifecycle::Ended;
                tracing::info!(session_id = %self.id, "draft ended");
            }
        }
        self.current_phase = controller.phase();

        // Budget left but nothing to ban or pick.
        if self.lifecycle.is_active() && self.consumed.len() == self.pool.len() {
            self.lifecycle = Lifecycle::Ended;
            tracing::info!(session_id = %self.id, "item pool exhausted, draft ended");
        }

        Ok(Selection {
            phase: self.current_phase,
            banned_items: self.banned_items.clone(),
            selected_items: self.players[seat].selections.clone(),
        })
    }

    /// Read-only projection for every client. Never includes secrets.
    pub fn snapshot(&self) -> DraftUpdate {
        DraftUpdate {
            session_id: self.id,
            name: self.name.clone(),
            current_phase: self.current_phase,
            banned_items: self.banned_items.clone(),
            current_player: self.current_player().map(|p| p.name.clone()),
            state: self.lifecycle,
            players: self.players.iter().map(Player::view).collect(),
        }
    }

    fn seat_of(&self, player_id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == player_id)
    }

    fn authorize(&self, seat: usize, secret: &str) -> Result<(), DraftError> {
        if self.players[seat].secret.verify(secret) {
            Ok(())
        } else {
            Err(DraftError::Unauthorized)
        }
    }
}
