//! Players and their secrets.

use std::fmt;

use pokedraft_protocol::{ItemId, PlayerId, PlayerView};
use rand::Rng;
use subtle::ConstantTimeEq;

/// A player's capability token: 128 random bits as 32 lowercase hex
/// characters.
///
/// Issued once at join and required for every mutating call afterwards.
/// `Debug` never prints the value.
#[derive(Clone)]
pub struct PlayerSecret(String);

impl PlayerSecret {
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let bytes: [u8; 16] = rng.random();
        Self(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }

    /// Compares against a presented secret in constant time.
    pub fn verify(&self, presented: &str) -> bool {
        self.0.as_bytes().ct_eq(presented.as_bytes()).into()
    }

    /// The raw value, for handing back to the joining client.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PlayerSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlayerSecret(<redacted>)")
    }
}

/// One seat in a draft session.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub(crate) secret: PlayerSecret,
    pub ready: bool,
    /// Picks in the order they were made.
    pub selections: Vec<ItemId>,
}

impl Player {
    pub(crate) fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            secret: PlayerSecret::generate(),
            ready: false,
            selections: Vec::new(),
        }
    }

    pub(crate) fn view(&self) -> PlayerView {
        PlayerView {
            id: self.id,
            name: self.name.clone(),
            selections: self.selections.clone(),
            ready: self.ready,
        }
    }
}
