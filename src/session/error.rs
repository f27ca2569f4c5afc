//! Session and authentication failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage failed: {0}")]
    Storage(#[from] std::io::Error),

    #[error("session data is not valid JSON: {0}")]
    Encode(#[from] serde_json::Error),

    /// The backend refused the credentials or the registration.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("auth request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid backend url: {0}")]
    InvalidUrl(String),

    /// No storage location could be determined for the session file.
    #[error("no session file location available")]
    NoStorageLocation,
}

/// Result alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
