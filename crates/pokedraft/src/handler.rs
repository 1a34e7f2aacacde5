//! Per-connection handler: decode requests, dispatch, encode responses.
//!
//! A connection is a plain request/response loop. Every request gets
//! exactly one response carrying the same `request_id`. Failures become
//! `Response::Error` and the connection stays open; only socket errors,
//! a close frame, or the idle timeout end it.

use std::sync::Arc;

use pokedraft_catalog::Catalog;
use pokedraft_protocol::{
    ClientEnvelope, Codec, ErrorCategory, Request, Response, ServerEnvelope,
};
use pokedraft_registry::{RegistryError, SessionRegistry};
use serde::Deserialize;

use crate::PokedraftError;
use crate::server::ServerState;
use crate::transport::Connection;

/// Used to recover the `request_id` from a frame whose request part
/// does not decode, so the error can still be correlated.
#[derive(Deserialize)]
struct RequestIdOnly {
    request_id: u64,
}

/// Handles a single connection from upgrade to close.
pub(crate) async fn handle_connection<C: Catalog>(
    mut conn: Connection,
    state: Arc<ServerState<C>>,
) -> Result<(), PokedraftError> {
    let conn_id = conn.id();

    loop {
        let data = match tokio::time::timeout(state.idle_timeout, conn.recv()).await {
            Ok(Ok(Some(data))) => data,
            Ok(Ok(None)) => {
                tracing::debug!(%conn_id, "connection closed cleanly");
                break;
            }
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => {
                tracing::info!(%conn_id, "connection idle, closing");
                conn.close().await;
                break;
            }
        };

        let reply = match state.codec.decode::<ClientEnvelope>(&data) {
            Ok(envelope) => ServerEnvelope {
                request_id: envelope.request_id,
                response: dispatch(&state.registry, envelope.request).await,
            },
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "undecodable request");
                let request_id = state
                    .codec
                    .decode::<RequestIdOnly>(&data)
                    .map_or(0, |r| r.request_id);
                ServerEnvelope {
                    request_id,
                    response: Response::error(ErrorCategory::BadRequest, e.to_string()),
                }
            }
        };

        let bytes = state.codec.encode(&reply)?;
        conn.send(bytes).await?;
    }

    Ok(())
}

/// Runs one request against the registry and builds its response.
pub(crate) async fn dispatch<C: Catalog>(
    registry: &SessionRegistry<C>,
    request: Request,
) -> Response {
    match execute(registry, request).await {
        Ok(response) => response,
        Err(e) => Response::error(e.category(), e.to_string()),
    }
}

async fn execute<C: Catalog>(
    registry: &SessionRegistry<C>,
    request: Request,
) -> Result<Response, RegistryError> {
    let response = match request {
        Request::CreateSession {
            name,
            draft_set,
            draft_rules,
            min_players,
            max_players,
        } => {
            let session_id = registry
                .create_session(name, draft_set, draft_rules, min_players, max_players)
                .await?;
            Response::SessionCreated { session_id }
        }

        Request::Join { session_id, name } => {
            let joined = registry.join(session_id, name).await?;
            Response::Joined {
                session_id,
                player_id: joined.id,
                name: joined.name,
                secret: joined.secret.expose().to_string(),
                ready: joined.ready,
            }
        }

        Request::ToggleReady {
            session_id,
            player_id,
            secret,
        } => {
            let ready = registry.toggle_ready(session_id, player_id, secret).await?;
            Response::Ack {
                message: if ready { "ready" } else { "not ready" }.to_string(),
            }
        }

        Request::Start {
            session_id,
            player_id,
            secret,
        } => {
            registry.start(session_id, player_id, secret).await?;
            Response::Ack {
                message: "draft started".to_string(),
            }
        }

        Request::SelectItem {
            session_id,
            player_id,
            secret,
            item_id,
            action,
        } => {
            let selection = registry
                .select_item(session_id, player_id, secret, item_id, action)
                .await?;
            Response::Selection(selection)
        }

        Request::GetUpdate { session_id } => Response::Update(registry.update(session_id).await?),

        Request::ListDraftSets => Response::DraftSets {
            sets: registry.draft_sets().await?,
        },

        Request::ListDraftRules => Response::DraftRules {
            rules: registry.draft_rules().await?,
        },
    };
    Ok(response)
}
