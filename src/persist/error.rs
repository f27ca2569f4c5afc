//! Deck persistence failures and backend validation messages.

use thiserror::Error;

/// Prefix the backend puts before a comma-separated list of deck-shape
/// validation failures.
pub const VALIDATION_PREFIX: &str = "Deck validation failed:";

/// A failed save, load, list or delete.
///
/// The in-memory deck is never touched by a failure; the user can retry.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Deck name cannot be empty.")]
    EmptyName,

    #[error("Please select a commander.")]
    MissingCommander,

    #[error("A save is already in progress.")]
    SaveInFlight,

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("deck request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
}

/// Result alias for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

impl PersistenceError {
    /// The individual messages to show for this failure.
    ///
    /// Backend validation failures are split into one message per
    /// problem; everything else is a single message.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match self {
            PersistenceError::Rejected { message, .. } => split_validation_messages(message),
            other => vec![other.to_string()],
        }
    }

    /// True if the backend rejected the deck shape itself.
    #[must_use]
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, PersistenceError::Rejected { message, .. } if message.contains(VALIDATION_PREFIX))
    }
}

/// Split a backend error string into human-readable messages.
///
/// `"Deck validation failed: a, b"` becomes `["a", "b"]`; any other string
/// is returned whole.
#[must_use]
pub fn split_validation_messages(message: &str) -> Vec<String> {
    match message.split_once(VALIDATION_PREFIX) {
        Some((_, rest)) => rest
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_owned)
            .collect(),
        None => vec![message.to_owned()],
    }
}
