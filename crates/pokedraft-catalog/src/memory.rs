//! In-memory [`Catalog`] implementation.

use std::collections::BTreeMap;

use pokedraft_protocol::{DraftRules, DraftSet, DraftSetId, ItemId, RulesEntry, RulesId};
use tokio::sync::RwLock;

use crate::{Catalog, CatalogError, DEBUG_SET_NAME, debug_set_items, rule_presets};

/// A catalog held entirely in memory.
///
/// Ids are assigned sequentially from 1 on insert and never reused.
/// `BTreeMap` keeps listings in id order.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    sets: RwLock<BTreeMap<u64, DraftSet>>,
    rules: RwLock<BTreeMap<u64, DraftRules>>,
}

impl MemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the stock rules presets (ids 1–6) and the
    /// debug draft set (id 1).
    pub fn seeded() -> Self {
        let rules = rule_presets()
            .into_iter()
            .zip(1u64..)
            .map(|(rules, id)| (id, rules))
            .collect();

        let mut sets = BTreeMap::new();
        sets.insert(
            1,
            DraftSet {
                id: DraftSetId(1),
                name: DEBUG_SET_NAME.to_string(),
                items: debug_set_items(),
            },
        );

        Self {
            sets: RwLock::new(sets),
            rules: RwLock::new(rules),
        }
    }

    /// Adds a draft set and returns its id.
    ///
    /// Duplicate items are dropped, keeping the first occurrence.
    ///
    /// # Errors
    /// [`CatalogError::InvalidDraftSet`] if the pool is empty.
    pub async fn insert_draft_set(
        &self,
        name: impl Into<String>,
        items: impl IntoIterator<Item = ItemId>,
    ) -> Result<DraftSetId, CatalogError> {
        let mut pool: Vec<ItemId> = Vec::new();
        for item in items {
            if !pool.contains(&item) {
                pool.push(item);
            }
        }
        if pool.is_empty() {
            return Err(CatalogError::InvalidDraftSet("draft set has no items".into()));
        }

        let mut sets = self.sets.write().await;
        let id = DraftSetId(next_key(&sets));
        let name = name.into();
        tracing::debug!(%id, %name, items = pool.len(), "draft set added");
        sets.insert(id.0, DraftSet { id, name, items: pool });
        Ok(id)
    }

    /// Adds a rules preset and returns its id.
    ///
    /// # Errors
    /// [`CatalogError::InvalidRules`] if the preset fails validation.
    pub async fn insert_draft_rules(&self, rules: DraftRules) -> Result<RulesId, CatalogError> {
        rules.validate().map_err(CatalogError::InvalidRules)?;

        let mut map = self.rules.write().await;
        let id = RulesId(next_key(&map));
        tracing::debug!(%id, name = %rules.name, "draft rules added");
        map.insert(id.0, rules);
        Ok(id)
    }
}

fn next_key<V>(map: &BTreeMap<u64, V>) -> u64 {
    map.keys().next_back().map_or(1, |last| last + 1)
}

impl Catalog for MemoryCatalog {
    async fn draft_set(&self, id: DraftSetId) -> Result<DraftSet, CatalogError> {
        self.sets
            .read()
            .await
            .get(&id.0)
            .cloned()
            .ok_or(CatalogError::DraftSetNotFound(id))
    }

    async fn draft_rules(&self, id: RulesId) -> Result<DraftRules, CatalogError> {
        self.rules
            .read()
            .await
            .get(&id.0)
            .cloned()
            .ok_or(CatalogError::RulesNotFound(id))
    }

    async fn draft_sets(&self) -> Result<Vec<DraftSet>, CatalogError> {
        Ok(self.sets.read().await.values().cloned().collect())
    }

    async fn all_draft_rules(&self) -> Result<Vec<RulesEntry>, CatalogError> {
        Ok(self
            .rules
            .read()
            .await
            .iter()
            .map(|(id, rules)| RulesEntry {
                id: RulesId(*id),
                rules: rules.clone(),
            })
            .collect())
    }
}
