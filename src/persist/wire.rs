//! Deck payloads on the persistence boundary.
//!
//! Outbound: `DeckPayload` (`{name, commander, mainboard, sideboard}`).
//! Inbound: `DeckRecord`, the same shape plus the backend's `_id` and its
//! freshly computed stats.

use serde::{Deserialize, Serialize};

use crate::deck::{Board, Deck, DeckId};
use crate::rules::Commander;
use crate::stats::DeckStats;

/// Body of a create or update request.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckPayload {
    pub name: String,
    pub commander: Option<Commander>,
    pub mainboard: Board,
    pub sideboard: Board,
}

impl From<&Deck> for DeckPayload {
    fn from(deck: &Deck) -> Self {
        Self {
            name: deck.name.trim().to_owned(),
            commander: deck.commander.clone(),
            mainboard: deck.mainboard.clone(),
            sideboard: deck.sideboard.clone(),
        }
    }
}

/// A stored deck as returned by the backend.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: DeckId,

    pub name: String,

    #[serde(default)]
    pub commander: Option<Commander>,

    #[serde(default)]
    pub mainboard: Board,

    #[serde(default)]
    pub sideboard: Board,

    #[serde(default)]
    pub stats: Option<DeckStats>,
}

impl From<DeckRecord> for Deck {
    fn from(record: DeckRecord) -> Self {
        Self {
            id: Some(record.id),
            name: record.name,
            commander: record.commander,
            mainboard: record.mainboard,
            sideboard: record.sideboard,
            stats: record.stats,
        }
    }
}
