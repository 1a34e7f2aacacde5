//! The session registry: creates sessions, routes operations to them.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use pokedraft_catalog::Catalog;
use pokedraft_protocol::{
    DraftPhase, DraftSet, DraftSetId, DraftUpdate, ItemId, PlayerId, RulesEntry, RulesId,
    Selection, SessionId,
};
use pokedraft_session::{DraftSession, JoinedPlayer};
use tokio::sync::RwLock;

use crate::actor::spawn_session;
use crate::{RegistryConfig, RegistryError, SessionHandle, SessionInfo};

/// Maps session ids to running session actors.
///
/// Created empty; sessions live until [`close_session`](Self::close_session).
/// All methods take `&self`, so the registry can sit in an `Arc` shared
/// by every connection task. The map lock is only held to look up or
/// insert a handle, never across a call into a session.
pub struct SessionRegistry<C: Catalog> {
    catalog: Arc<C>,
    config: RegistryConfig,
    sessions: RwLock<HashMap<SessionId, SessionHandle>>,
    next_session_id: AtomicU64,
}

impl<C: Catalog> SessionRegistry<C> {
    pub fn new(catalog: Arc<C>, config: RegistryConfig) -> Self {
        Self {
            catalog,
            config,
            sessions: RwLock::new(HashMap::new()),
            next_session_id: AtomicU64::new(1),
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Creates a session from catalog references and starts its actor.
    ///
    /// The handle is only published once the session is fully built, so
    /// no lookup can observe a half-made session.
    ///
    /// # Errors
    /// A [`RegistryError::Catalog`] error if either reference is unknown,
    /// or a [`DraftError::InvalidConfiguration`](pokedraft_session::DraftError::InvalidConfiguration)
    /// for bad player limits or rules.
    pub async fn create_session(
        &self,
        name: impl Into<String>,
        draft_set: DraftSetId,
        rules: RulesId,
        min_players: usize,
        max_players: usize,
    ) -> Result<SessionId, RegistryError> {
        let set = self.catalog.draft_set(draft_set).await?;
        let rules = self.catalog.draft_rules(rules).await?;

        let session_id = SessionId(self.next_session_id.fetch_add(1, Ordering::Relaxed));
        let session = DraftSession::new(session_id, name, &set, rules, min_players, max_players)?;
        let handle = spawn_session(session, self.config.channel_size);

        self.sessions.write().await.insert(session_id, handle);
        tracing::info!(%session_id, %draft_set, min_players, max_players, "session created");
        Ok(session_id)
    }

    /// Returns a clone of the session's handle.
    pub async fn handle(&self, session_id: SessionId) -> Result<SessionHandle, RegistryError> {
        self.sessions
            .read()
            .await
            .get(&session_id)
            .cloned()
            .ok_or(RegistryError::SessionNotFound(session_id))
    }

    pub async fn join(
        &self,
        session_id: SessionId,
        name: impl Into<String>,
    ) -> Result<JoinedPlayer, RegistryError> {
        self.handle(session_id).await?.join(name.into()).await
    }

    pub async fn toggle_ready(
        &self,
        session_id: SessionId,
        player_id: PlayerId,
        secret: impl Into<String>,
    ) -> Result<bool, RegistryError> {
        self.handle(session_id)
            .await?
            .toggle_ready(player_id, secret.into())
            .await
    }

    pub async fn start(
        &self,
        session_id: SessionId,
        player_id: PlayerId,
        secret: impl Into<String>,
    ) -> Result<(), RegistryError> {
        self.handle(session_id)
            .await?
            .start(player_id, secret.into())
            .await
    }

    pub async fn select_item(
        &self,
        session_id: SessionId,
        player_id: PlayerId,
        secret: impl Into<String>,
        item: ItemId,
        action: DraftPhase,
    ) -> Result<Selection, RegistryError> {
        self.handle(session_id)
            .await?
            .select_item(player_id, secret.into(), item, action)
            .await
    }

    /// The read-only projection of a session.
    pub async fn update(&self, session_id: SessionId) -> Result<DraftUpdate, RegistryError> {
        self.handle(session_id).await?.snapshot().await
    }

    /// Stops a session's actor and forgets it.
    pub async fn close_session(&self, session_id: SessionId) -> Result<(), RegistryError> {
        let handle = self
            .sessions
            .write()
            .await
            .remove(&session_id)
            .ok_or(RegistryError::SessionNotFound(session_id))?;

        let _ = handle.shutdown().await;
        tracing::info!(%session_id, "session closed");
        Ok(())
    }

    /// Lists every live session, ordered by id.
    ///
    /// Sessions whose actor does not answer are skipped.
    pub async fn list_sessions(&self) -> Vec<SessionInfo> {
        let handles: Vec<SessionHandle> = self.sessions.read().await.values().cloned().collect();

        let mut infos = Vec::with_capacity(handles.len());
        for handle in handles {
            if let Ok(info) = handle.info().await {
                infos.push(info);
            }
        }
        infos.sort_by_key(|info| info.session_id.0);
        infos
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn draft_sets(&self) -> Result<Vec<DraftSet>, RegistryError> {
        Ok(self.catalog.draft_sets().await?)
    }

    pub async fn draft_rules(&self) -> Result<Vec<RulesEntry>, RegistryError> {
        Ok(self.catalog.all_draft_rules().await?)
    }
}
