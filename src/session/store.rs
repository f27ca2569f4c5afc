//! Key-value storage for session data.
//!
//! `FileStore` keeps a flat JSON object of string values in one file and
//! rewrites the file on every change. `MemoryStore` keeps the same map in
//! memory only.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use rustc_hash::FxHashMap;
use tracing::debug;

use super::error::{SessionError, SessionResult};
use crate::config::EngineConfig;

/// String values under string keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> SessionResult<()>;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> SessionResult<()>;
}

/// Write-through JSON file store.
#[derive(Debug)]
pub struct FileStore {
    data: RwLock<FxHashMap<String, String>>,
    path: PathBuf,
}

impl FileStore {
    /// Open the store at `path`. A missing or empty file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> SessionResult<Self> {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => FxHashMap::default(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => FxHashMap::default(),
            Err(err) => return Err(err.into()),
        };
        debug!(path = %path.display(), keys = data.len(), "opened session store");
        Ok(Self {
            data: RwLock::new(data),
            path,
        })
    }

    /// Open the store at the configured session path, creating its
    /// directory if needed.
    pub fn from_config(config: &EngineConfig) -> SessionResult<Self> {
        let path = config.session_path().ok_or(SessionError::NoStorageLocation)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        Self::open(path)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, data: &FxHashMap<String, String>) -> SessionResult<()> {
        let content = serde_json::to_string(data)?;
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        data.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> SessionResult<()> {
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        data.insert(key.to_owned(), value.to_owned());
        self.save(&data)
    }

    fn remove(&self, key: &str) -> SessionResult<()> {
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        if data.remove(key).is_some() {
            self.save(&data)?;
        }
        Ok(())
    }
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<FxHashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        data.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> SessionResult<()> {
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        data.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> SessionResult<()> {
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        data.remove(key);
        Ok(())
    }
}
