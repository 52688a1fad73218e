//! Client-local key/value storage.
//!
//! Holds the handful of values the client keeps between runs: the theme
//! preference and the last search result set. Values are plain strings, as
//! in browser local storage, and never expire.
//!
//! # File Layout
//!
//! ```text
//! ~/.local/share/research-hub/
//!   storage.json      {"theme": "dark", "search_results": "[...]"}
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::Record;

/// Key holding the theme preference
pub const THEME_KEY: &str = "theme";

/// Key holding the JSON-encoded last result set
pub const RESULTS_KEY: &str = "search_results";

/// Name of the storage file inside the storage directory
pub const STORAGE_FILE: &str = "storage.json";

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A string key/value store.
pub trait KeyValueStore: std::fmt::Debug {
    /// Read a value
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Mirror a result set into the store as a JSON array
pub fn cache_results(store: &mut dyn KeyValueStore, records: &[Record]) -> Result<(), StorageError> {
    let encoded = serde_json::to_string(records)?;
    store.set(RESULTS_KEY, &encoded)
}

/// Store kept only in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Store persisted as a JSON object, written through on every change
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store in `dir`, creating nothing until the first write.
    ///
    /// An unreadable or corrupt file is logged and treated as empty.
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(STORAGE_FILE);
        let values = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!("Ignoring corrupt storage file {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!("Cannot read storage file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        tracing::debug!("Storage opened at {} ({} keys)", path.display(), values.len());
        Self { path, values }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(THEME_KEY), None);
        store.set(THEME_KEY, "light").unwrap();
        assert_eq!(store.get(THEME_KEY), Some("light".to_string()));
        store.remove(THEME_KEY).unwrap();
        assert_eq!(store.get(THEME_KEY), None);
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempdir().unwrap();
        {
            let mut store = FileStore::open(dir.path());
            store.set(THEME_KEY, "light").unwrap();
        }
        let reopened = FileStore::open(dir.path());
        assert_eq!(reopened.get(THEME_KEY), Some("light".to_string()));
        assert!(reopened.path().exists());
    }

    #[test]
    fn test_file_store_creates_directory_lazily() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut store = FileStore::open(&nested);
        assert!(!nested.exists());
        store.set("k", "v").unwrap();
        assert!(nested.join(STORAGE_FILE).exists());
    }

    #[test]
    fn test_file_store_ignores_corrupt_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(STORAGE_FILE), "{not json").unwrap();
        let store = FileStore::open(dir.path());
        assert_eq!(store.get(THEME_KEY), None);
    }

    #[test]
    fn test_cache_results_round_trip() {
        let mut store = MemoryStore::new();
        let records = vec![
            Record::new(1, "First", "2023-01-01"),
            Record::new(2, "Second", "2023-01-02"),
        ];
        cache_results(&mut store, &records).unwrap();

        let raw = store.get(RESULTS_KEY).unwrap();
        let decoded: Vec<Record> = serde_json::from_str(&raw).unwrap();
        assert_eq!(decoded, records);
    }
}
