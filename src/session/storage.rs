//! Durable key/value storage for the session credential.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;
use tracing::warn;

/// Owner read/write only; the file holds a bearer token.
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("session storage lock poisoned")]
    Poisoned,
}

/// Minimal storage interface the session needs: read, write and remove a key.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn clear(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage for tests and short-lived processes.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// JSON file storage, one object of string values. Survives restarts of the CLI.
///
/// Writes go to a sibling temp file that is renamed over the real one, so a
/// crash never leaves a half-written session behind. Should the file still
/// be unreadable, `get` reports it while `set` and `clear` start over from
/// an empty object.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serialises read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>, StorageError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Like `read_map`, but a corrupt file counts as empty so it can be
    /// replaced. The flag is set when the file content was discarded.
    fn read_map_for_update(&self) -> Result<(Map<String, Value>, bool), StorageError> {
        match self.read_map() {
            Ok(map) => Ok((map, false)),
            Err(StorageError::Corrupt(e)) => {
                warn!(path = %self.path.display(), "Discarding unreadable session file: {}", e);
                Ok((Map::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(map)?;

        let temp_path = self.path.with_extension("tmp");
        match std::fs::remove_file(&temp_path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e.into()),
            _ => {}
        }
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(FILE_MODE);
        }
        let mut file = options.open(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        drop(file);

        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        let map = self.read_map()?;
        Ok(map.get(key).and_then(|v| v.as_str()).map(str::to_string))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        let (mut map, _) = self.read_map_for_update()?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.write_map(&map)
    }

    fn clear(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        let (mut map, discarded) = self.read_map_for_update()?;
        if map.remove(key).is_some() || discarded {
            self.write_map(&map)?;
        }
        Ok(())
    }
}
