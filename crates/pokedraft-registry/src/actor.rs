//! Session actor: a Tokio task that owns one [`DraftSession`].
//!
//! Every operation on a session, reads included, is a command on the
//! actor's channel. The task applies them one at a time in arrival
//! order, so mutations never race and a caller always reads its own
//! writes.

use pokedraft_protocol::{
    DraftPhase, DraftSetId, DraftUpdate, ItemId, Lifecycle, PlayerId, Selection, SessionId,
};
use pokedraft_session::{DraftError, DraftSession, JoinedPlayer};
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};

use crate::RegistryError;

type Reply<T> = oneshot::Sender<Result<T, DraftError>>;

/// Commands sent to a session actor.
pub(crate) enum SessionCommand {
    Join {
        name: String,
        reply: Reply<JoinedPlayer>,
    },
    ToggleReady {
        player_id: PlayerId,
        secret: String,
        reply: Reply<bool>,
    },
    Start {
        player_id: PlayerId,
        secret: String,
        reply: Reply<()>,
    },
    SelectItem {
        player_id: PlayerId,
        secret: String,
        item: ItemId,
        action: DraftPhase,
        reply: Reply<Selection>,
    },
    Snapshot {
        reply: oneshot::Sender<DraftUpdate>,
    },
    Info {
        reply: oneshot::Sender<SessionInfo>,
    },
    Shutdown,
}

/// Lightweight listing row for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub session_id: SessionId,
    pub name: String,
    pub state: Lifecycle,
    pub draft_set: DraftSetId,
    pub player_count: usize,
    pub min_players: usize,
    pub max_players: usize,
}

/// Cloneable handle to a running session actor.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    session_id: SessionId,
    sender: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Sends a command and waits for the actor's reply.
    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> SessionCommand,
    ) -> Result<T, RegistryError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(command(reply_tx))
            .await
            .map_err(|_| RegistryError::Unavailable(self.session_id))?;
        reply_rx
            .await
            .map_err(|_| RegistryError::Unavailable(self.session_id))
    }

    pub async fn join(&self, name: String) -> Result<JoinedPlayer, RegistryError> {
        Ok(self
            .request(|reply| SessionCommand::Join { name, reply })
            .await??)
    }

    pub async fn toggle_ready(
        &self,
        player_id: PlayerId,
        secret: String,
    ) -> Result<bool, RegistryError> {
        Ok(self
            .request(|reply| SessionCommand::ToggleReady {
                player_id,
                secret,
                reply,
            })
            .await??)
    }

    pub async fn start(&self, player_id: PlayerId, secret: String) -> Result<(), RegistryError> {
        Ok(self
            .request(|reply| SessionCommand::Start {
                player_id,
                secret,
                reply,
            })
            .await??)
    }

    pub async fn select_item(
        &self,
        player_id: PlayerId,
        secret: String,
        item: ItemId,
        action: DraftPhase,
    ) -> Result<Selection, RegistryError> {
        Ok(self
            .request(|reply| SessionCommand::SelectItem {
                player_id,
                secret,
                item,
                action,
                reply,
            })
            .await??)
    }

    pub async fn snapshot(&self) -> Result<DraftUpdate, RegistryError> {
        self.request(|reply| SessionCommand::Snapshot { reply }).await
    }

    pub async fn info(&self) -> Result<SessionInfo, RegistryError> {
        self.request(|reply| SessionCommand::Info { reply }).await
    }

    /// Asks the actor to stop. Commands queued before the shutdown are
    /// still applied in order; anything sent after it sees
    /// [`RegistryError::Unavailable`].
    pub async fn shutdown(&self) -> Result<(), RegistryError> {
        self.sender
            .send(SessionCommand::Shutdown)
            .await
            .map_err(|_| RegistryError::Unavailable(self.session_id))
    }
}

struct SessionActor {
    session: DraftSession,
    receiver: mpsc::Receiver<SessionCommand>,
}

impl SessionActor {
    async fn run(mut self) {
        let session_id = self.session.id();
        tracing::info!(%session_id, "session actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                SessionCommand::Join { name, reply } => {
                    let result = self.session.join(name);
                    respond(session_id, reply, result);
                }
                SessionCommand::ToggleReady {
                    player_id,
                    secret,
                    reply,
                } => {
                    let result = self.session.toggle_ready(player_id, &secret);
                    respond(session_id, reply, result);
                }
                SessionCommand::Start {
                    player_id,
                    secret,
                    reply,
                } => {
                    let result = self.session.start(player_id, &secret);
                    respond(session_id, reply, result);
                }
                SessionCommand::SelectItem {
                    player_id,
                    secret,
                    item,
                    action,
                    reply,
                } => {
                    let result = self.session.select_item(player_id, &secret, item, action);
                    respond(session_id, reply, result);
                }
                SessionCommand::Snapshot { reply } => {
                    let _ = reply.send(self.session.snapshot());
                }
                SessionCommand::Info { reply } => {
                    let _ = reply.send(self.info());
                }
                SessionCommand::Shutdown => {
                    tracing::info!(%session_id, "session shutting down");
                    break;
                }
            }
        }

        tracing::info!(%session_id, "session actor stopped");
    }

    fn info(&self) -> SessionInfo {
        let s = &self.session;
        SessionInfo {
            session_id: s.id(),
            name: s.name().to_string(),
            state: s.lifecycle(),
            draft_set: s.draft_set(),
            player_count: s.players().len(),
            min_players: s.min_players(),
            max_players: s.max_players(),
        }
    }
}

/// Logs rejections and hands the result back to the caller.
fn respond<T>(session_id: SessionId, reply: Reply<T>, result: Result<T, DraftError>) {
    if let Err(e) = &result {
        tracing::debug!(%session_id, category = %e.category(), error = %e, "operation rejected");
    }
    if reply.send(result).is_err() {
        tracing::warn!(%session_id, "caller went away before the reply");
    }
}

/// Spawns an actor for a fully built session and returns its handle.
pub(crate) fn spawn_session(session: DraftSession, channel_size: usize) -> SessionHandle {
    let (tx, rx) = mpsc::channel(channel_size.max(1));
    let session_id = session.id();

    let actor = SessionActor {
        session,
        receiver: rx,
    };
    tokio::spawn(actor.run());

    SessionHandle {
        session_id,
        sender: tx,
    }
}
