//! Commander eligibility and the commander snapshot kept by a deck.

use serde::{Deserialize, Serialize};

use super::error::{ValidationError, ValidationResult};
use super::identity::{commander_status, is_commander_format_legal};
use crate::cards::{CardId, CardRecord, ColorSet};

const PLANESWALKER_COMMANDER_TEXT: &str = "can be your commander";

/// The deck's commander, frozen at selection time.
///
/// A projection of the source `CardRecord`; later catalog changes to the
/// card do not reach a deck that already stores it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commander {
    #[serde(alias = "scryfallId")]
    pub id: CardId,

    pub name: String,

    #[serde(default, alias = "imageUrl")]
    pub image: Option<String>,

    #[serde(default)]
    pub color_identity: ColorSet,
}

impl Commander {
    /// Snapshot a record without checking eligibility.
    ///
    /// Use `can_be_commander` for the checked path.
    #[must_use]
    pub fn from_record(card: &CardRecord) -> Self {
        Self {
            id: card.id.clone(),
            name: card.name.clone(),
            image: card.primary_image().map(str::to_owned),
            color_identity: card.color_identity,
        }
    }
}

/// True if the type line (and oracle text, for planeswalkers) allows the
/// card to lead a deck.
#[must_use]
pub fn has_commander_type(card: &CardRecord) -> bool {
    if card.type_line.contains("Legendary Creature") {
        return true;
    }
    card.type_line.contains("Planeswalker")
        && card
            .rules_text()
            .is_some_and(|text| text.contains(PLANESWALKER_COMMANDER_TEXT))
}

/// Check that a card may be the commander and snapshot it.
///
/// The type condition is checked first, so a card failing both checks
/// reports `NotEligibleType`.
pub fn can_be_commander(card: &CardRecord) -> ValidationResult<Commander> {
    if !has_commander_type(card) {
        return Err(ValidationError::NotEligibleType {
            name: card.name.clone(),
        });
    }
    if !is_commander_format_legal(card) {
        return Err(ValidationError::IllegalInFormat {
            name: card.name.clone(),
            status: commander_status(card).to_owned(),
        });
    }
    Ok(Commander::from_record(card))
}
