//! Card data: colors, catalog records, and a record cache.
//!
//! ## Key Types
//!
//! - `Color` / `ColorSet`: WUBRG symbols and bitset color sets
//! - `CardId`: Catalog identifier of a printing
//! - `CardRecord`: Immutable catalog card, validated at deserialization
//! - `CardCache`: Fetched records by id and by name
//!
//! Records are read-only. Anything the deck keeps (entries, commander)
//! is copied out of a record when it is selected.

pub mod cache;
pub mod color;
pub mod record;

pub use cache::CardCache;
pub use color::{Color, ColorSet};
pub use record::{is_basic_land, CardFace, CardId, CardRecord, ImageUris, Legalities, RecordError};
