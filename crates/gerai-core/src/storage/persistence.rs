//! Key-value persistence
//!
//! Handles saving and loading named values to/from a durable backend.
//! The file backend uses atomic writes (write to temp file, then rename) to
//! prevent corruption.
//!
//! Storage location: `~/.local/share/gerai/store/` (configurable via `Config`)
//!
//! Files (one per key):
//! - `inventory_items` - JSON array of records, newest first
//! - `vendors` - JSON array of vendor names
//! - `sink_url`, `access_secret` - plain text
//! - `admin_mode` - JSON boolean

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::error::{StorageError, StorageResult};
use crate::config::Config;

/// Raw text backend for the persistent store
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` when absent
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`; removing an absent key is not an error
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// File-per-key backend rooted at a directory
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a file store, creating the root directory if needed
    pub fn open(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StorageError::CreateDirectory {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    /// Root directory of this store
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::ReadError { path, source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        atomic_write(&path, value.as_bytes())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::from_io(e, path)),
        }
    }
}

/// HashMap-backed store for tests and throwaway sessions
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StorageError::LockPoisoned("get"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::LockPoisoned("set"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::LockPoisoned("remove"))?;
        entries.remove(key);
        Ok(())
    }
}

/// Typed access to a shared key-value backend
///
/// Cheap to clone; every repository holds its own handle and owns one key.
#[derive(Clone)]
pub struct PersistentStore {
    backend: Arc<dyn KeyValueStore>,
}

impl PersistentStore {
    /// Wrap a backend
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Open the file-backed store described by the configuration
    pub fn open(config: &Config) -> StorageResult<Self> {
        Ok(Self::new(FileStore::open(config.store_dir())?))
    }

    /// Store that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Load a JSON value, falling back to `default` on any failure
    pub fn load_json<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(content) = self.load_text(key) else {
            return default;
        };

        match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                warn!("Could not decode stored value for '{}', using default: {}", key, e);
                default
            }
        }
    }

    /// Serialize and store a JSON value
    pub fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        let content = serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.save_text(key, &content)
    }

    /// Load a plain text value, `None` when absent or unreadable
    pub fn load_text(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(Some(content)) => Some(content),
            Ok(None) => {
                debug!("No stored value for '{}'", key);
                None
            }
            Err(e) => {
                warn!("Could not read stored value for '{}': {}", key, e);
                None
            }
        }
    }

    /// Store a plain text value
    pub fn save_text(&self, key: &str, value: &str) -> StorageResult<()> {
        self.backend.set(key, value)?;
        debug!("Saved '{}' ({} bytes)", key, value.len());
        Ok(())
    }

    /// Remove a value
    pub fn remove(&self, key: &str) -> StorageResult<()> {
        self.backend.remove(key)?;
        debug!("Removed '{}'", key);
        Ok(())
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// The target file is never left in a partially-written state.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file_store(temp_dir: &TempDir) -> PersistentStore {
        PersistentStore::new(FileStore::open(temp_dir.path().join("store")).unwrap())
    }

    #[test]
    fn test_save_and_load_json() {
        let temp_dir = TempDir::new().unwrap();
        let store = file_store(&temp_dir);

        let vendors = vec!["Kak Ani".to_string(), "Pak Abu".to_string()];
        store.save_json("vendors", &vendors).unwrap();

        let loaded: Vec<String> = store.load_json("vendors", Vec::new());
        assert_eq!(loaded, vendors);
    }

    #[test]
    fn test_missing_key_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let store = file_store(&temp_dir);

        let loaded: Vec<String> = store.load_json("vendors", vec!["seed".to_string()]);
        assert_eq!(loaded, vec!["seed".to_string()]);
        assert!(store.load_text("sink_url").is_none());
    }

    #[test]
    fn test_corrupt_payload_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let store = file_store(&temp_dir);

        store.save_text("admin_mode", "{not json").unwrap();
        assert!(!store.load_json("admin_mode", false));

        // Wrong shape is also a decode failure
        store.save_text("vendors", r#"{"a": 1}"#).unwrap();
        let loaded: Vec<String> = store.load_json("vendors", Vec::new());
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_text_round_trip_and_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = file_store(&temp_dir);

        store
            .save_text("sink_url", "https://script.google.com/macros/s/abc/exec")
            .unwrap();
        assert_eq!(
            store.load_text("sink_url").as_deref(),
            Some("https://script.google.com/macros/s/abc/exec")
        );

        store.remove("sink_url").unwrap();
        assert!(store.load_text("sink_url").is_none());

        // Removing again is fine
        store.remove("sink_url").unwrap();
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();

        file_store(&temp_dir).save_json("admin_mode", &true).unwrap();

        let reopened = file_store(&temp_dir);
        assert!(reopened.load_json("admin_mode", false));
    }

    #[test]
    fn test_invalid_key_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileStore::open(temp_dir.path()).unwrap();

        let err = backend.set("../escape", "x").unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
        assert!(matches!(
            backend.get("").unwrap_err(),
            StorageError::InvalidKey(_)
        ));
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir.path().join("a").join("b").join("file.txt");

        atomic_write(&nested_path, b"test data").unwrap();

        assert!(nested_path.exists());
        assert!(!nested_path.with_extension("tmp").exists());
        let content = fs::read_to_string(&nested_path).unwrap();
        assert_eq!(content, "test data");
    }

    #[test]
    fn test_memory_store_shares_state_between_clones() {
        let backend = MemoryStore::new();
        let store = PersistentStore::new(backend.clone());

        store.save_json("admin_mode", &true).unwrap();
        assert_eq!(backend.get("admin_mode").unwrap().as_deref(), Some("true"));

        let other = store.clone();
        other.remove("admin_mode").unwrap();
        assert!(!store.load_json("admin_mode", false));
    }
}
