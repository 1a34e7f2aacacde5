//! Unified error type for Pokedraft.

use pokedraft_catalog::CatalogError;
use pokedraft_protocol::{ErrorCategory, ProtocolError};
use pokedraft_registry::RegistryError;
use pokedraft_session::DraftError;

use crate::TransportError;

/// Top-level error wrapping every crate-specific error, so `?` works
/// across layers.
#[derive(Debug, thiserror::Error)]
pub enum PokedraftError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl PokedraftError {
    /// The category a client would see for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Transport(_) => ErrorCategory::Unavailable,
            Self::Protocol(_) => ErrorCategory::BadRequest,
            Self::Catalog(CatalogError::Unavailable(_)) => ErrorCategory::Unavailable,
            Self::Catalog(_) => ErrorCategory::InvalidConfiguration,
            Self::Draft(e) => e.category(),
            Self::Registry(e) => e.category(),
        }
    }
}
