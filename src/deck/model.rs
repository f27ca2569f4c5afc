//! The deck as exchanged with the persistence collaborator.

use serde::{Deserialize, Serialize};

use super::entry::Board;
use crate::rules::Commander;
use crate::stats::DeckStats;

/// Backend-assigned deck identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckId(pub String);

impl DeckId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A complete deck.
///
/// `id` is `None` until the first successful save. `stats` is the last
/// snapshot the backend reported, not a live computation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Deck {
    pub id: Option<DeckId>,
    pub name: String,
    pub commander: Option<Commander>,
    pub mainboard: Board,
    pub sideboard: Board,
    pub stats: Option<DeckStats>,
}

impl Deck {
    /// A new, unsaved, empty deck.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }
}
