//! Catalog query failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog answered but refused the query.
    #[error("Failed to search cards: {message}")]
    Query { status: u16, message: String },

    #[error("Failed to search cards: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("page numbers start at 1 (got {0})")]
    InvalidPage(u32),

    #[error("invalid catalog url: {0}")]
    InvalidUrl(String),
}

/// Result alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
