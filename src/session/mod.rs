//! Signed-in user state.
//!
//! ## Key Types
//!
//! - `KeyValueStore`: Where the session is remembered (`FileStore`, `MemoryStore`)
//! - `AuthClient`: Sign-in and registration against the backend
//! - `UserSession`: The current user, loaded on start and cleared on sign-out

pub mod auth;
pub mod error;
pub mod store;
pub mod user;

pub use auth::{AuthClient, AuthUser, Credentials, HttpAuthClient, Registration};
pub use error::{SessionError, SessionResult};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use user::{UserSession, USER_KEY};
