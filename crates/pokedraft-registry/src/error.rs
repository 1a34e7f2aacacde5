//! Error types for the registry layer.

use pokedraft_catalog::CatalogError;
use pokedraft_protocol::{ErrorCategory, SessionId};
use pokedraft_session::DraftError;

/// Errors returned by [`SessionRegistry`](crate::SessionRegistry).
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("session {0} not found")]
    SessionNotFound(SessionId),

    /// The session actor has stopped or its channel closed.
    #[error("session {0} is unavailable")]
    Unavailable(SessionId),

    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl RegistryError {
    /// The wire category for this error.
    ///
    /// Missing or invalid catalog references are configuration errors
    /// from the caller's point of view.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SessionNotFound(_) => ErrorCategory::SessionNotFound,
            Self::Unavailable(_) => ErrorCategory::Unavailable,
            Self::Draft(e) => e.category(),
            Self::Catalog(CatalogError::Unavailable(_)) => ErrorCategory::Unavailable,
            Self::Catalog(_) => ErrorCategory::InvalidConfiguration,
        }
    }
}
