//! Deck entries and the boards that hold them.
//!
//! A `Board` is a multiset of cards expressed as one `DeckEntry` per card id
//! with a `count`. It supports:
//! - Singleton enforcement (one copy of anything but basic lands)
//! - Stacking basic lands by incrementing `count`
//! - Removing one copy or the whole entry
//!
//! Boards are backed by `im::Vector`, so cloning a deck to hand it to the
//! persistence collaborator is O(1) and leaves the editor free to keep
//! mutating its own copy.

use im::Vector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{is_basic_land, CardId, CardRecord, ColorSet};
use crate::rules::{ValidationError, ValidationResult};

/// Most copies a single stored entry may claim.
pub const MAX_ENTRY_COUNT: u32 = 1_000;

/// Why a stored entry could not become a `DeckEntry`.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EntryError {
    #[error("deck entry has an empty id")]
    EmptyId,

    #[error("deck entry {id} has an empty name")]
    EmptyName { id: String },

    #[error("deck entry {name} has invalid mana value {value}")]
    InvalidManaValue { name: String, value: f64 },

    #[error("deck entry {name} claims too many copies ({count})")]
    CountTooLarge { name: String, count: u32 },
}

/// One distinct card in a board, with its copy count.
///
/// Display fields are copied from the `CardRecord` when the card is added,
/// so statistics and rendering never need the catalog again. Stored
/// entries are checked when deserialized, the same way catalog records are.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDeckEntry")]
pub struct DeckEntry {
    pub id: CardId,

    pub name: String,

    /// Number of copies, at most `MAX_ENTRY_COUNT` when loaded.
    pub count: u32,

    pub image: Option<String>,

    /// Never negative.
    pub mana_value: f64,

    pub colors: ColorSet,

    pub color_identity: ColorSet,

    pub type_line: String,
}

/// Stored entry before validation. Accepts the backend's older field names.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDeckEntry {
    #[serde(alias = "scryfallId")]
    id: String,
    name: String,
    count: u32,
    #[serde(default, alias = "imageUrl")]
    image: Option<String>,
    #[serde(default, alias = "cmc")]
    mana_value: f64,
    #[serde(default)]
    colors: ColorSet,
    #[serde(default, alias = "color_identity")]
    color_identity: ColorSet,
    #[serde(default, alias = "type_line")]
    type_line: String,
}

impl TryFrom<RawDeckEntry> for DeckEntry {
    type Error = EntryError;

    fn try_from(raw: RawDeckEntry) -> Result<Self, Self::Error> {
        if raw.id.trim().is_empty() {
            return Err(EntryError::EmptyId);
        }
        if raw.name.trim().is_empty() {
            return Err(EntryError::EmptyName { id: raw.id });
        }
        if !raw.mana_value.is_finite() || raw.mana_value < 0.0 {
            return Err(EntryError::InvalidManaValue {
                name: raw.name,
                value: raw.mana_value,
            });
        }
        if raw.count > MAX_ENTRY_COUNT {
            return Err(EntryError::CountTooLarge {
                name: raw.name,
                count: raw.count,
            });
        }
        Ok(DeckEntry {
            id: CardId(raw.id),
            name: raw.name,
            count: raw.count,
            image: raw.image,
            mana_value: raw.mana_value,
            colors: raw.colors,
            color_identity: raw.color_identity,
            type_line: raw.type_line,
        })
    }
}

impl DeckEntry {
    /// A single copy of `card`.
    #[must_use]
    pub fn from_card(card: &CardRecord) -> Self {
        Self {
            id: card.id.clone(),
            name: card.name.clone(),
            count: 1,
            image: card.primary_image().map(str::to_owned),
            mana_value: card.cmc,
            colors: card.colors,
            color_identity: card.color_identity,
            type_line: card.type_line.clone(),
        }
    }

    #[must_use]
    pub fn is_basic_land(&self) -> bool {
        is_basic_land(&self.type_line)
    }

    /// Overwrite display fields from a fresher record, keeping id and count.
    pub fn refresh_from(&mut self, card: &CardRecord) {
        self.name = card.name.clone();
        if let Some(image) = card.primary_image() {
            self.image = Some(image.to_owned());
        }
        self.mana_value = card.cmc;
        self.colors = card.colors;
        self.color_identity = card.color_identity;
        self.type_line = card.type_line.clone();
    }
}

/// Ordered set of `DeckEntry` keyed by card id.
///
/// Card ids are unique within a board; duplicates only ever show up as
/// `count`. Entries keep insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<DeckEntry>", into = "Vec<DeckEntry>")]
pub struct Board {
    entries: Vector<DeckEntry>,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total copies across all entries.
    #[must_use]
    pub fn card_count(&self) -> u32 {
        self.entries
            .iter()
            .fold(0u32, |total, e| total.saturating_add(e.count))
    }

    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&DeckEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.position(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeckEntry> {
        self.entries.iter()
    }

    /// Add one copy of `card`.
    ///
    /// A basic land already present gets its count bumped; any other
    /// repeat is rejected and the board is left untouched. Returns the
    /// entry's count after the add.
    pub fn add(&mut self, card: &CardRecord) -> ValidationResult<u32> {
        match self.position(&card.id) {
            Some(index) => {
                if !card.is_basic_land() {
                    return Err(ValidationError::DuplicateNonBasic {
                        name: card.name.clone(),
                    });
                }
                let entry = &mut self.entries[index];
                entry.count = entry.count.saturating_add(1);
                Ok(entry.count)
            }
            None => {
                self.entries.push_back(DeckEntry::from_card(card));
                Ok(1)
            }
        }
    }

    /// Remove one copy, or the whole entry when `remove_all` is set.
    ///
    /// Absent ids are a no-op. Returns the count left for the id
    /// (0 when the entry is gone or never existed).
    pub fn remove(&mut self, id: &CardId, remove_all: bool) -> u32 {
        let Some(index) = self.position(id) else {
            return 0;
        };
        if remove_all || self.entries[index].count <= 1 {
            self.entries.remove(index);
            return 0;
        }
        let entry = &mut self.entries[index];
        entry.count -= 1;
        entry.count
    }

    /// Refresh an entry's display fields from a catalog record.
    ///
    /// Returns false if no entry has `id`.
    pub fn refresh(&mut self, id: &CardId, card: &CardRecord) -> bool {
        match self.position(id) {
            Some(index) => {
                self.entries[index].refresh_from(card);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn position(&self, id: &CardId) -> Option<usize> {
        self.entries.iter().position(|e| &e.id == id)
    }
}

impl From<Vec<DeckEntry>> for Board {
    /// Build a board from stored entries, merging repeated ids and
    /// dropping zero counts.
    fn from(entries: Vec<DeckEntry>) -> Self {
        let mut board = Board::new();
        for entry in entries {
            if entry.count == 0 {
                continue;
            }
            match board.position(&entry.id) {
                Some(index) => {
                    let merged = &mut board.entries[index].count;
                    *merged = merged.saturating_add(entry.count);
                }
                None => board.entries.push_back(entry),
            }
        }
        board
    }
}

impl From<Board> for Vec<DeckEntry> {
    fn from(board: Board) -> Self {
        board.entries.into_iter().collect()
    }
}

impl FromIterator<DeckEntry> for Board {
    fn from_iter<T: IntoIterator<Item = DeckEntry>>(iter: T) -> Self {
        Board::from(iter.into_iter().collect::<Vec<_>>())
    }
}
