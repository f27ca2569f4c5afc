//! Deck composer: the commander plus the mainboard, and the rules that
//! gate every change to them.
//!
//! ## Add pipeline
//!
//! `add_card` checks, in order:
//! 1. a commander is selected
//! 2. the card's color identity fits inside the commander's
//! 3. the card is legal in Commander
//! 4. the singleton rule (basic lands stack instead)
//!
//! A failed check leaves the mainboard untouched.
//!
//! There is no hard 99-card ceiling here. Deck size is reported through
//! `DeckStats` so a deck can run over while cards are being swapped.

use tracing::debug;

use crate::cards::{CardId, CardRecord};
use crate::rules::{
    can_be_commander, commander_status, is_commander_format_legal, is_within_identity, Commander,
    ValidationError, ValidationResult,
};
use crate::stats::{compute_stats, DeckStats};

use super::entry::{Board, DeckEntry};

/// Owned editing state for one deck: commander and mainboard.
///
/// Single writer: each deck edit session owns its composer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeckComposer {
    commander: Option<Commander>,
    mainboard: Board,
}

impl DeckComposer {
    /// Create an empty composer with no commander.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a composer from stored deck parts.
    #[must_use]
    pub fn from_parts(commander: Option<Commander>, mainboard: Board) -> Self {
        Self {
            commander,
            mainboard,
        }
    }

    #[must_use]
    pub fn commander(&self) -> Option<&Commander> {
        self.commander.as_ref()
    }

    #[must_use]
    pub fn mainboard(&self) -> &Board {
        &self.mainboard
    }

    /// Replace (or clear) the commander.
    ///
    /// Existing mainboard entries are not re-checked against the new
    /// identity; see `entries_outside_identity`.
    pub fn set_commander(&mut self, commander: Option<Commander>) {
        debug!(
            commander = commander.as_ref().map(|c| c.name.as_str()),
            "commander replaced"
        );
        self.commander = commander;
    }

    /// Validate `card` as a commander and select it.
    pub fn select_commander(&mut self, card: &CardRecord) -> ValidationResult<&Commander> {
        let commander = can_be_commander(card).inspect_err(|err| {
            debug!(card = %card.name, kind = err.kind(), "commander rejected");
        })?;
        debug!(commander = %commander.name, "commander selected");
        Ok(self.commander.insert(commander))
    }

    /// Add one copy of `card` to the mainboard.
    pub fn add_card(&mut self, card: &CardRecord) -> ValidationResult<()> {
        let result = self.try_add(card);
        if let Err(err) = &result {
            debug!(card = %card.name, kind = err.kind(), "card rejected");
        }
        result
    }

    fn try_add(&mut self, card: &CardRecord) -> ValidationResult<()> {
        let commander = self
            .commander
            .as_ref()
            .ok_or(ValidationError::NoCommanderSelected)?;

        if !is_within_identity(card, commander.color_identity) {
            return Err(ValidationError::OutsideColorIdentity {
                name: card.name.clone(),
            });
        }

        if !is_commander_format_legal(card) {
            return Err(ValidationError::IllegalInFormat {
                name: card.name.clone(),
                status: commander_status(card).to_owned(),
            });
        }

        let count = self.mainboard.add(card)?;
        debug!(card = %card.name, count, "card added");
        Ok(())
    }

    /// Remove one copy of `id`, or every copy when `remove_all` is set.
    ///
    /// Removing an id that isn't in the mainboard does nothing.
    pub fn remove_card(&mut self, id: &CardId, remove_all: bool) {
        if self.mainboard.contains(id) {
            let left = self.mainboard.remove(id, remove_all);
            debug!(card = %id, left, "card removed");
        }
    }

    /// Refresh a mainboard entry's card data, keeping its count.
    ///
    /// Not a rules-checked change: the entry is already in the deck.
    pub fn refresh_entry(&mut self, id: &CardId, card: &CardRecord) -> bool {
        self.mainboard.refresh(id, card)
    }

    /// Mainboard entries whose identity no longer fits the commander.
    ///
    /// Empty when there is no commander. Read-only; nothing is pruned.
    pub fn entries_outside_identity(&self) -> impl Iterator<Item = &DeckEntry> {
        let identity = self.commander.as_ref().map(|c| c.color_identity);
        self.mainboard
            .iter()
            .filter(move |e| identity.is_some_and(|id| !id.contains_all(e.color_identity)))
    }

    /// Statistics for the current state.
    #[must_use]
    pub fn stats(&self) -> DeckStats {
        compute_stats(self.commander.as_ref(), &self.mainboard)
    }

    /// Hand back commander and mainboard.
    #[must_use]
    pub fn into_parts(self) -> (Option<Commander>, Board) {
        (self.commander, self.mainboard)
    }
}
