//! # commander-deck
//!
//! Deck construction and validation for the Commander format.
//!
//! ## Design Principles
//!
//! 1. **Owned State**: A deck being edited is one owned value
//!    (`DeckEditor` wrapping a `DeckComposer`). Commands mutate it, queries
//!    read it. Nothing is global.
//!
//! 2. **Rules Before Mutation**: Every add is checked (commander selected,
//!    color identity, legality, singleton) before the mainboard changes. A
//!    rejected add changes nothing.
//!
//! 3. **Validated Boundaries**: Catalog and deck JSON is checked when it is
//!    deserialized. Optional fields are `Option`, never empty strings.
//!
//! ## Synchronous Core, Async Edges
//!
//! Composition, validation and statistics are plain synchronous calls. Only
//! the catalog, deck storage and authentication collaborators are async,
//! behind the `CatalogClient`, `DeckStore` and `AuthClient` traits.
//!
//! ## Modules
//!
//! - `cards`: Colors, catalog card records, record cache
//! - `rules`: Color identity, Commander legality, commander eligibility
//! - `deck`: Entries and boards, the composer, the deck editor
//! - `stats`: Mana curve, color breakdown, type partition
//! - `search`: Catalog client and the debounced search session
//! - `persist`: Deck payloads, deck storage, backend validation messages
//! - `session`: Signed-in user and its storage
//! - `config`: Engine configuration
//! - `logging`: Subscriber setup

pub mod cards;
pub mod config;
pub mod deck;
pub mod logging;
pub mod persist;
pub mod rules;
pub mod search;
pub mod session;
pub mod stats;

mod http;

// Re-export commonly used types
pub use crate::cards::{CardCache, CardFace, CardId, CardRecord, Color, ColorSet, ImageUris, Legalities};

pub use crate::rules::{
    can_be_commander, is_commander_format_legal, is_within_identity, Commander, ValidationError,
    ValidationResult,
};

pub use crate::deck::{Board, Deck, DeckComposer, DeckEditor, DeckEntry, DeckId, DeckSizeStatus};

pub use crate::stats::{compute_stats, ColorBreakdown, DeckStats, ManaCurve, TypeBreakdown, TypeBucket};

pub use crate::search::{
    CatalogClient, CatalogError, CatalogSearchSession, HttpCatalogClient, SearchPage, SearchResults,
    SearchTicket,
};

pub use crate::persist::{
    split_validation_messages, DeckPayload, DeckRecord, DeckStore, HttpDeckStore, PersistenceError,
};

pub use crate::session::{AuthClient, AuthUser, FileStore, HttpAuthClient, KeyValueStore, MemoryStore, UserSession};

pub use crate::config::EngineConfig;
pub use crate::logging::setup_logger;
