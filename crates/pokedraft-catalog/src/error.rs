//! Error types for the catalog layer.

use pokedraft_protocol::{DraftSetId, RulesId};

/// Errors returned by a [`Catalog`](crate::Catalog).
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("draft set {0} not found")]
    DraftSetNotFound(DraftSetId),

    #[error("draft rules {0} not found")]
    RulesNotFound(RulesId),

    /// A preset was rejected by [`DraftRules::validate`](pokedraft_protocol::DraftRules::validate).
    #[error("invalid draft rules: {0}")]
    InvalidRules(String),

    #[error("invalid draft set: {0}")]
    InvalidDraftSet(String),

    /// The backing store could not be reached. Not produced by
    /// [`MemoryCatalog`](crate::MemoryCatalog).
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}
