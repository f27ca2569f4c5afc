//! Engine configuration.
//!
//! Defaults suit a local backend. `EngineConfig::from_env` layers values
//! from the process environment (and a `.env` file, when present) on top:
//!
//! | Variable                    | Field              |
//! |-----------------------------|--------------------|
//! | `DECK_BACKEND_URL`          | `backend_url`      |
//! | `DECK_SEARCH_DEBOUNCE_MS`   | `search_debounce`  |
//! | `DECK_SIZE_TARGET`          | `deck_size_target` |
//! | `DECK_REQUEST_TIMEOUT_SECS` | `request_timeout`  |
//! | `DECK_SESSION_FILE`         | `session_file`     |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

const APP_QUALIFIER: &str = "com";
const APP_AUTHOR: &str = "commander-deck";
const APP_NAME: &str = "commander-deck";
const SESSION_FILE_NAME: &str = "session.json";

/// Runtime configuration shared by the collaborator clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base URL of the backend serving `/cards`, `/decks` and `/users`.
    pub backend_url: String,

    /// Quiet period before a typed query is sent (default: 500 ms).
    pub search_debounce: Duration,

    /// Advisory mainboard size, commander excluded (default: 99).
    /// Reported, never enforced.
    pub deck_size_target: u32,

    /// Per-request timeout for backend calls.
    pub request_timeout: Duration,

    /// Where the signed-in user is remembered. `None` uses the platform
    /// data directory.
    pub session_file: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:5000/api".to_string(),
            search_debounce: Duration::from_millis(500),
            deck_size_target: 99,
            request_timeout: Duration::from_secs(15),
            session_file: None,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by environment variables.
    ///
    /// Unparsable values are logged and ignored.
    #[must_use]
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let mut config = Self::default();
        if let Ok(url) = env::var("DECK_BACKEND_URL") {
            config.backend_url = url;
        }
        if let Some(ms) = parse_var::<u64>("DECK_SEARCH_DEBOUNCE_MS") {
            config.search_debounce = Duration::from_millis(ms);
        }
        if let Some(target) = parse_var::<u32>("DECK_SIZE_TARGET") {
            config.deck_size_target = target;
        }
        if let Some(secs) = parse_var::<u64>("DECK_REQUEST_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Ok(path) = env::var("DECK_SESSION_FILE") {
            config.session_file = Some(PathBuf::from(path));
        }
        config
    }

    /// Set the backend base URL.
    #[must_use]
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }

    /// Set the search debounce delay.
    #[must_use]
    pub fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce = delay;
        self
    }

    #[must_use]
    pub fn with_deck_size_target(mut self, target: u32) -> Self {
        self.deck_size_target = target;
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// The session file, falling back to the platform data directory.
    ///
    /// `None` if no home directory can be determined.
    #[must_use]
    pub fn session_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.session_file {
            return Some(path.clone());
        }
        ProjectDirs::from(APP_QUALIFIER, APP_AUTHOR, APP_NAME)
            .map(|dirs| dirs.data_local_dir().join(SESSION_FILE_NAME))
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = name, value = %raw, "ignoring unparsable configuration value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.search_debounce, Duration::from_millis(500));
        assert_eq!(config.deck_size_target, 99);
        assert!(config.session_file.is_none());
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::default()
            .with_backend_url("https://decks.example/api")
            .with_search_debounce(Duration::from_millis(250))
            .with_session_file("/tmp/session.json");

        assert_eq!(config.backend_url, "https://decks.example/api");
        assert_eq!(config.search_debounce, Duration::from_millis(250));
        assert_eq!(config.session_path(), Some(PathBuf::from("/tmp/session.json")));
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"backend_url":"http://h/api"}"#).unwrap();
        assert_eq!(config.backend_url, "http://h/api");
        assert_eq!(config.deck_size_target, 99);
    }
}
