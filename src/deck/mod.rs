//! Decks and deck editing.
//!
//! ## Key Types
//!
//! - `DeckEntry` / `Board`: Counted card entries, unique by card id
//! - `DeckComposer`: Commander plus mainboard, with the add/remove rules
//! - `Deck` / `DeckId`: A complete deck as stored
//! - `DeckEditor`: A deck being edited, with its save lifecycle

pub mod composer;
pub mod editor;
pub mod entry;
pub mod model;

pub use composer::DeckComposer;
pub use editor::{DeckEditor, DeckSizeStatus, SaveRequest};
pub use entry::{Board, DeckEntry, EntryError, MAX_ENTRY_COUNT};
pub use model::{Deck, DeckId};
