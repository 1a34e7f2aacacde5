//! `PokedraftServer` builder and accept loop.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use pokedraft_catalog::Catalog;
use pokedraft_protocol::JsonCodec;
use pokedraft_registry::{RegistryConfig, SessionRegistry};
use serde::{Deserialize, Serialize};

use crate::PokedraftError;
use crate::handler::handle_connection;
use crate::transport::{Connection, WebSocketListener};

/// Server settings. Override fields on `ServerConfig::default()` or go
/// through [`PokedraftServerBuilder`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on. Port 0 picks a free port.
    pub bind_addr: String,

    /// A connection that sends nothing for this long is closed.
    pub idle_timeout: Duration,

    pub registry: RegistryConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            idle_timeout: Duration::from_secs(300),
            registry: RegistryConfig::default(),
        }
    }
}

/// Shared by every connection task.
pub(crate) struct ServerState<C: Catalog> {
    pub(crate) registry: Arc<SessionRegistry<C>>,
    pub(crate) codec: JsonCodec,
    pub(crate) idle_timeout: Duration,
}

/// Builder for configuring and starting a server.
///
/// ```rust,no_run
/// use pokedraft::prelude::*;
///
/// # async fn run() -> Result<(), PokedraftError> {
/// let server = PokedraftServerBuilder::new()
///     .bind("0.0.0.0:8080")
///     .build(MemoryCatalog::seeded())
///     .await?;
/// server.run().await
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct PokedraftServerBuilder {
    config: ServerConfig,
}

impl PokedraftServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, addr: &str) -> Self {
        self.config.bind_addr = addr.to_string();
        self
    }

    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.idle_timeout = timeout;
        self
    }

    pub fn registry_config(mut self, config: RegistryConfig) -> Self {
        self.config.registry = config;
        self
    }

    /// Replaces every setting at once.
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Binds the listener and creates an empty session registry over
    /// `catalog`.
    pub async fn build<C: Catalog>(self, catalog: C) -> Result<PokedraftServer<C>, PokedraftError> {
        let listener = WebSocketListener::bind(&self.config.bind_addr).await?;
        let registry = Arc::new(SessionRegistry::new(
            Arc::new(catalog),
            self.config.registry.clone(),
        ));

        let state = Arc::new(ServerState {
            registry,
            codec: JsonCodec,
            idle_timeout: self.config.idle_timeout,
        });
        Ok(PokedraftServer { listener, state })
    }
}

/// A bound draft server. Call [`run()`](Self::run) to start serving.
pub struct PokedraftServer<C: Catalog> {
    listener: WebSocketListener,
    state: Arc<ServerState<C>>,
}

impl<C: Catalog> PokedraftServer<C> {
    /// The address actually bound (useful with port 0).
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// The registry behind this server, for in-process access.
    pub fn registry(&self) -> Arc<SessionRegistry<C>> {
        Arc::clone(&self.state.registry)
    }

    /// Accepts connections until the process ends. Each connection gets
    /// its own task; a failing connection never stops the loop.
    pub async fn run(self) -> Result<(), PokedraftError> {
        tracing::info!(addr = ?self.local_addr().ok(), "pokedraft server running");

        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        let conn = match Connection::upgrade(stream).await {
                            Ok(conn) => conn,
                            Err(e) => {
                                tracing::debug!(%peer, error = %e, "websocket upgrade failed");
                                return;
                            }
                        };
                        tracing::debug!(conn_id = %conn.id(), %peer, "connection accepted");
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
