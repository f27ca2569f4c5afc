//! One deck being edited: composer, sideboard, name, and its save state.
//!
//! ## Saving
//!
//! A save is split in two so the caller controls the request:
//! `begin_save` checks the local preconditions, raises the in-flight flag
//! and hands out the payload; `finish_save` lowers the flag and applies the
//! backend's answer. `save` does both around a `DeckStore` call.
//!
//! While a save is in flight `can_save` is false and `begin_save` refuses.
//! A failed save leaves the deck exactly as it was.
//!
//! ## Stats
//!
//! `stats` is what the backend last reported and is shown verbatim after
//! a save or load. `local_stats` recomputes from the live state.

use std::fmt;

use tracing::{debug, info, warn};

use super::composer::DeckComposer;
use super::entry::Board;
use super::model::{Deck, DeckId};
use crate::cards::{CardCache, CardId, CardRecord};
use crate::persist::{DeckPayload, DeckRecord, DeckStore, PersistenceError, PersistenceResult};
use crate::rules::ValidationResult;
use crate::search::CatalogClient;
use crate::stats::{compute_stats, DeckStats};

/// What `begin_save` hands to the caller: where to save, and what.
#[derive(Clone, Debug, PartialEq)]
pub struct SaveRequest {
    /// `None` creates a new deck.
    pub id: Option<DeckId>,
    pub payload: DeckPayload,
}

/// Mainboard size against the advisory target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeckSizeStatus {
    pub count: u32,
    pub target: u32,
}

impl DeckSizeStatus {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.count == self.target
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.count > self.target
    }

    /// Cards still needed to reach the target.
    #[must_use]
    pub fn missing(&self) -> u32 {
        self.target.saturating_sub(self.count)
    }
}

impl fmt::Display for DeckSizeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.count, self.target)
    }
}

#[derive(Clone, Debug, Default)]
pub struct DeckEditor {
    id: Option<DeckId>,
    name: String,
    composer: DeckComposer,
    sideboard: Board,
    stats: Option<DeckStats>,
    saving: bool,
    validation_messages: Vec<String>,
}

impl DeckEditor {
    /// A fresh, unsaved deck.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Edit an existing deck, keeping its stored stats.
    #[must_use]
    pub fn from_deck(deck: Deck) -> Self {
        Self {
            id: deck.id,
            name: deck.name,
            composer: DeckComposer::from_parts(deck.commander, deck.mainboard),
            sideboard: deck.sideboard,
            stats: deck.stats,
            ..Self::default()
        }
    }

    /// Fetch deck `id` from `store` for editing.
    pub async fn load<S: DeckStore>(store: &S, id: &DeckId) -> PersistenceResult<Self> {
        let record = store.get(id).await.inspect_err(|err| {
            warn!(deck = %id, %err, "failed to load deck");
        })?;
        debug!(deck = %id, name = %record.name, "deck loaded");
        Ok(Self::from_deck(record.into()))
    }

    #[must_use]
    pub fn id(&self) -> Option<&DeckId> {
        self.id.as_ref()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub fn composer(&self) -> &DeckComposer {
        &self.composer
    }

    /// Commander and mainboard commands go through the composer.
    pub fn composer_mut(&mut self) -> &mut DeckComposer {
        &mut self.composer
    }

    #[must_use]
    pub fn sideboard(&self) -> &Board {
        &self.sideboard
    }

    /// Add one copy of `card` to the sideboard.
    ///
    /// Same counting as the mainboard; no commander checks.
    pub fn add_to_sideboard(&mut self, card: &CardRecord) -> ValidationResult<u32> {
        self.sideboard.add(card)
    }

    pub fn remove_from_sideboard(&mut self, id: &CardId, remove_all: bool) -> u32 {
        self.sideboard.remove(id, remove_all)
    }

    /// Stats as last reported by the backend.
    #[must_use]
    pub fn stats(&self) -> Option<&DeckStats> {
        self.stats.as_ref()
    }

    /// Stats computed from the current state.
    #[must_use]
    pub fn local_stats(&self) -> DeckStats {
        compute_stats(self.composer.commander(), self.composer.mainboard())
    }

    #[must_use]
    pub fn deck_size_status(&self, target: u32) -> DeckSizeStatus {
        DeckSizeStatus {
            count: self.composer.mainboard().card_count(),
            target,
        }
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    #[must_use]
    pub fn can_save(&self) -> bool {
        !self.saving
    }

    /// Messages from the last failed save, one per problem.
    #[must_use]
    pub fn validation_messages(&self) -> &[String] {
        &self.validation_messages
    }

    /// The deck as it stands.
    #[must_use]
    pub fn snapshot(&self) -> Deck {
        Deck {
            id: self.id.clone(),
            name: self.name.clone(),
            commander: self.composer.commander().cloned(),
            mainboard: self.composer.mainboard().clone(),
            sideboard: self.sideboard.clone(),
            stats: self.stats.clone(),
        }
    }

    /// Check preconditions and mark a save as in flight.
    pub fn begin_save(&mut self) -> PersistenceResult<SaveRequest> {
        if self.saving {
            return Err(PersistenceError::SaveInFlight);
        }
        let precondition = if self.name.trim().is_empty() {
            Some(PersistenceError::EmptyName)
        } else if self.composer.commander().is_none() {
            Some(PersistenceError::MissingCommander)
        } else {
            None
        };
        if let Some(err) = precondition {
            self.validation_messages = err.messages();
            return Err(err);
        }

        self.saving = true;
        self.validation_messages.clear();
        Ok(SaveRequest {
            id: self.id.clone(),
            payload: DeckPayload::from(&self.snapshot()),
        })
    }

    /// Apply the backend's answer to the save started by `begin_save`.
    ///
    /// On success the assigned id and the reported stats are adopted as is.
    pub fn finish_save(&mut self, outcome: PersistenceResult<DeckRecord>) -> PersistenceResult<&DeckId> {
        self.saving = false;
        match outcome {
            Ok(record) => {
                info!(deck = %record.id, "deck saved");
                self.stats = record.stats;
                Ok(self.id.insert(record.id))
            }
            Err(err) => {
                warn!(%err, "deck save failed");
                self.validation_messages = err.messages();
                Err(err)
            }
        }
    }

    /// Create or update the deck in `store`.
    pub async fn save<S: DeckStore>(&mut self, store: &S) -> PersistenceResult<DeckId> {
        let request = self.begin_save()?;
        let outcome = match &request.id {
            Some(id) => store.update(id, &request.payload).await,
            None => store.create(&request.payload).await,
        };
        self.finish_save(outcome).cloned()
    }

    /// Replace each mainboard entry's card data with the catalog's, looked
    /// up by name. Counts are kept. Lookups go through `cache` first.
    ///
    /// Entries that can't be fetched keep their stored data. Returns how
    /// many entries were refreshed.
    pub async fn rehydrate<C: CatalogClient>(&mut self, catalog: &C, cache: &mut CardCache) -> usize {
        let wanted: Vec<(CardId, String)> = self
            .composer
            .mainboard()
            .iter()
            .map(|e| (e.id.clone(), e.name.clone()))
            .collect();

        let mut refreshed = 0;
        for (id, name) in wanted {
            if cache.get_by_name(&name).is_none() {
                match catalog.card_by_name(&name).await {
                    Ok(card) => {
                        cache.insert(card);
                    }
                    Err(err) => {
                        warn!(card = %name, %err, "could not refresh card data");
                        continue;
                    }
                }
            }
            if let Some(card) = cache.get_by_name(&name) {
                if self.composer.refresh_entry(&id, card) {
                    refreshed += 1;
                }
            }
        }
        debug!(refreshed, "mainboard rehydrated");
        refreshed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::ColorSet;

    fn marwyn() -> CardRecord {
        CardRecord::new("cmd", "Marwyn, the Nurturer", "Legendary Creature — Elf Druid")
            .with_identity(ColorSet::GREEN)
            .with_legality("commander", "legal")
    }

    fn ready_editor() -> DeckEditor {
        let mut editor = DeckEditor::new();
        editor.set_name("Elves");
        editor.composer_mut().select_commander(&marwyn()).unwrap();
        editor
    }

    #[test]
    fn test_save_preconditions() {
        let mut editor = DeckEditor::new();
        editor.set_name("   ");
        assert!(matches!(editor.begin_save(), Err(PersistenceError::EmptyName)));
        assert_eq!(editor.validation_messages(), ["Deck name cannot be empty."]);

        editor.set_name("Elves");
        assert!(matches!(editor.begin_save(), Err(PersistenceError::MissingCommander)));
        assert!(!editor.is_saving());
    }

    #[test]
    fn test_in_flight_flag() {
        let mut editor = ready_editor();
        let request = editor.begin_save().unwrap();
        assert_eq!(request.id, None);
        assert_eq!(request.payload.name, "Elves");
        assert!(!editor.can_save());
        assert!(matches!(editor.begin_save(), Err(PersistenceError::SaveInFlight)));

        let outcome = Err(PersistenceError::Rejected {
            status: 400,
            message: "Deck validation failed: Too many cards, Illegal card: Mana Crypt".into(),
        });
        assert!(editor.finish_save(outcome).is_err());
        assert!(editor.can_save());
        assert_eq!(
            editor.validation_messages(),
            ["Too many cards", "Illegal card: Mana Crypt"]
        );
        assert_eq!(editor.id(), None);
    }

    #[test]
    fn test_deck_size_status() {
        let mut editor = ready_editor();
        let forest = CardRecord::new("f", "Forest", "Basic Land — Forest")
            .with_identity(ColorSet::GREEN)
            .with_legality("commander", "legal");
        for _ in 0..3 {
            editor.composer_mut().add_card(&forest).unwrap();
        }

        let status = editor.deck_size_status(99);
        assert_eq!(status.to_string(), "3/99");
        assert_eq!(status.missing(), 96);
        assert!(!status.is_complete());
        assert!(!status.is_over());
    }

    #[test]
    fn test_sideboard_skips_identity() {
        let mut editor = ready_editor();
        let bolt = CardRecord::new("b", "Lightning Bolt", "Instant").with_identity(ColorSet::RED);
        assert_eq!(editor.add_to_sideboard(&bolt), Ok(1));
        assert!(editor.composer().mainboard().is_empty());
        assert_eq!(editor.remove_from_sideboard(&CardId::new("b"), false), 0);
        assert!(editor.sideboard().is_empty());
    }
}
