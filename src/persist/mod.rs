//! Deck persistence boundary.
//!
//! - `DeckPayload` / `DeckRecord`: the exchanged deck shape
//! - `DeckStore`: create, update, get, list, delete
//! - `HttpDeckStore`: `DeckStore` over the REST backend
//! - `PersistenceError` and backend validation-message splitting

pub mod error;
pub mod store;
pub mod wire;

pub use error::{split_validation_messages, PersistenceError, PersistenceResult, VALIDATION_PREFIX};
pub use store::{DeckStore, HttpDeckStore};
pub use wire::{DeckPayload, DeckRecord};
