//! Read-only catalog of draft sets and rules presets.
//!
//! Sessions never own catalog data: at creation the registry looks up a
//! [`DraftSet`](pokedraft_protocol::DraftSet) and a
//! [`DraftRules`](pokedraft_protocol::DraftRules) preset through the
//! [`Catalog`] trait and the session keeps its own snapshot.
//!
//! Where the data comes from (a Pokédex importer, a database, a config
//! file) is up to the implementor. [`MemoryCatalog`] covers tests and the
//! stand-alone server, and [`MemoryCatalog::seeded`] loads the stock
//! presets.

#![allow(async_fn_in_trait)]

mod catalog;
mod error;
mod memory;
mod presets;

pub use catalog::Catalog;
pub use error::CatalogError;
pub use memory::MemoryCatalog;
pub use presets::{DEBUG_SET_NAME, debug_set_items, rule_presets};
