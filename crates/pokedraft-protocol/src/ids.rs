//! Identifier newtypes shared by every Pokedraft layer.
//!
//! Each identifier wraps a primitive in a named struct so a `SessionId`
//! can never be passed where a `PlayerId` is expected, even though both
//! are `u64` underneath. `#[serde(transparent)]` keeps them as plain
//! numbers on the wire: `PlayerId(42)` serializes as `42`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one draft session. Assigned by the registry at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}", self.0)
    }
}

/// Identifies one player. Issued when the player joins a session and
/// never reused, so it is unique across sessions as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A selectable item (a Pokédex number in the stock catalog).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Reference to a draft set held by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftSetId(pub u64);

impl fmt::Display for DraftSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "set-{}", self.0)
    }
}

/// Reference to a rules preset held by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RulesId(pub u64);

impl fmt::Display for RulesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rules-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_plain_numbers() {
        assert_eq!(serde_json::to_string(&SessionId(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&PlayerId(42)).unwrap(), "42");
        assert_eq!(serde_json::to_string(&ItemId(25)).unwrap(), "25");
    }

    #[test]
    fn test_ids_display() {
        assert_eq!(SessionId(3).to_string(), "S-3");
        assert_eq!(PlayerId(7).to_string(), "P-7");
        assert_eq!(ItemId(151).to_string(), "#151");
        assert_eq!(DraftSetId(2).to_string(), "set-2");
        assert_eq!(RulesId(5).to_string(), "rules-5");
    }

    #[test]
    fn test_item_ids_order_numerically() {
        let mut items = vec![ItemId(10), ItemId(2), ItemId(7)];
        items.sort();
        assert_eq!(items, vec![ItemId(2), ItemId(7), ItemId(10)]);
    }
}
