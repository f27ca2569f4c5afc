//! Color identity and format legality predicates.
//!
//! Both checks are pure and total over a `CardRecord`.

use crate::cards::{CardRecord, ColorSet};

/// Legalities key for the Commander format.
pub const COMMANDER_FORMAT: &str = "commander";

/// Legality status that allows play.
pub const LEGAL: &str = "legal";

/// Status reported when the catalog has no entry for the format.
pub const NOT_LEGAL: &str = "not_legal";

/// True iff every color in the card's identity is in `commander_identity`.
///
/// A colorless card fits any commander; a colorless commander only
/// accepts colorless cards.
#[must_use]
pub fn is_within_identity(card: &CardRecord, commander_identity: ColorSet) -> bool {
    commander_identity.contains_all(card.color_identity)
}

/// True iff the catalog lists the card as `legal` in Commander.
///
/// Any other status, or no status at all, is not legal.
#[must_use]
pub fn is_commander_format_legal(card: &CardRecord) -> bool {
    card.legalities.status(COMMANDER_FORMAT) == Some(LEGAL)
}

/// The card's Commander legality status as shown to the player.
#[must_use]
pub fn commander_status(card: &CardRecord) -> &str {
    card.legalities.status(COMMANDER_FORMAT).unwrap_or(NOT_LEGAL)
}
