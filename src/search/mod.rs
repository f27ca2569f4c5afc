//! Catalog search.
//!
//! ## Key Types
//!
//! - `CatalogClient`: Async access to the card catalog
//! - `HttpCatalogClient`: `CatalogClient` over the backend's REST API
//! - `Debouncer`: Quiet-period timer for typed input
//! - `CatalogSearchSession`: Owned search state with ordered, page-replacing results
//!
//! ## Flow
//!
//! Keystrokes go into the session with the current instant. Once the
//! text has been stable for the configured delay, `poll` hands out a
//! ticket for page 1. Page navigation hands one out immediately. The
//! caller fetches each ticket and reports back; out-of-date responses
//! are ignored.

pub mod client;
pub mod debounce;
pub mod error;
pub mod session;

pub use client::{CatalogClient, HttpCatalogClient, SearchPage};
pub use debounce::Debouncer;
pub use error::{CatalogError, CatalogResult};
pub use session::{dedup_by_printing, CatalogSearchSession, SearchResults, SearchTicket};
