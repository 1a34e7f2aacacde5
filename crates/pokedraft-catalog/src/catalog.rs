//! The catalog boundary trait.

use pokedraft_protocol::{DraftRules, DraftSet, DraftSetId, RulesEntry, RulesId};

use crate::CatalogError;

/// Looks up the immutable records a draft session is created from.
///
/// Implementations are shared by every connection task for the lifetime
/// of the server, hence `Send + Sync + 'static`.
///
/// # Example
///
/// ```rust
/// use pokedraft_catalog::{Catalog, CatalogError};
/// use pokedraft_protocol::{
///     DraftPhase, DraftRules, DraftSet, DraftSetId, ItemId, RulesEntry, RulesId, TurnMode,
/// };
///
/// /// One fixed set and one fixed preset.
/// struct FixedCatalog;
///
/// impl Catalog for FixedCatalog {
///     async fn draft_set(&self, id: DraftSetId) -> Result<DraftSet, CatalogError> {
///         Ok(DraftSet { id, name: "Starters".into(), items: vec![ItemId(1), ItemId(4), ItemId(7)] })
///     }
///
///     async fn draft_rules(&self, _id: RulesId) -> Result<DraftRules, CatalogError> {
///         Ok(DraftRules {
///             name: "Quick".into(),
///             picks_per_round: 1,
///             bans_per_round: 0,
///             max_selections: 1,
///             starting_phase: DraftPhase::Pick,
///             turn_mode: TurnMode::RoundRobin,
///         })
///     }
///
///     async fn draft_sets(&self) -> Result<Vec<DraftSet>, CatalogError> {
///         Ok(vec![self.draft_set(DraftSetId(1)).await?])
///     }
///
///     async fn all_draft_rules(&self) -> Result<Vec<RulesEntry>, CatalogError> {
///         let rules = self.draft_rules(RulesId(1)).await?;
///         Ok(vec![RulesEntry { id: RulesId(1), rules }])
///     }
/// }
/// ```
pub trait Catalog: Send + Sync + 'static {
    /// Fetches one draft set.
    ///
    /// # Errors
    /// [`CatalogError::DraftSetNotFound`] if `id` is unknown.
    fn draft_set(
        &self,
        id: DraftSetId,
    ) -> impl std::future::Future<Output = Result<DraftSet, CatalogError>> + Send;

    /// Fetches one rules preset.
    ///
    /// # Errors
    /// [`CatalogError::RulesNotFound`] if `id` is unknown.
    fn draft_rules(
        &self,
        id: RulesId,
    ) -> impl std::future::Future<Output = Result<DraftRules, CatalogError>> + Send;

    /// Lists every draft set, ordered by id.
    fn draft_sets(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<DraftSet>, CatalogError>> + Send;

    /// Lists every rules preset, ordered by id.
    fn all_draft_rules(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<RulesEntry>, CatalogError>> + Send;
}
