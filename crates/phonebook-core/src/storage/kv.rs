//! Key-value storage media
//!
//! A synchronous, string-keyed, string-valued store with the semantics of
//! browser local storage. `FileStorage` keeps one file per key inside a
//! directory; `MemoryStorage` keeps values in a shared in-process map.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::error::{PersistenceError, PersistenceResult};

/// A durable string key-value medium
pub trait KeyValueStorage {
    /// Read the value stored under `key`, if any
    fn get_item(&self, key: &str) -> PersistenceResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&mut self, key: &str, value: &str) -> PersistenceResult<()>;
}

/// Directory-backed storage: each key is a file inside `dir`
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a storage rooted at `dir`
    ///
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file holding `key`
    pub fn item_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> PersistenceResult<Option<String>> {
        let path = self.item_path(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::from_read(e, path)),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| PersistenceError::CreateDirectory {
            path: self.dir.clone(),
            source: e,
        })?;

        let path = self.item_path(key);
        atomic_write(&path, value.as_bytes()).map_err(|e| PersistenceError::from_write(e, path))
    }
}

/// In-process storage
///
/// Clones share the same map, so a clone handed to a store can be
/// inspected or pre-seeded from outside.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-seeded with one value
    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.insert(key, value);
        storage
    }

    /// Insert a value without going through the trait (shared handle)
    pub fn insert(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    /// Read a value without going through the trait (shared handle)
    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map still holds consistent strings
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> PersistenceResult<Option<String>> {
        Ok(self.get(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        self.insert(key, value);
        Ok(())
    }
}

/// Storage that reads like `MemoryStorage` but refuses every write
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct ReadOnlyStorage {
    inner: MemoryStorage,
}

#[cfg(test)]
impl ReadOnlyStorage {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KeyValueStorage for ReadOnlyStorage {
    fn get_item(&self, key: &str) -> PersistenceResult<Option<String>> {
        self.inner.get_item(key)
    }

    fn set_item(&mut self, key: &str, _value: &str) -> PersistenceResult<()> {
        Err(PersistenceError::Write {
            path: PathBuf::from("/read-only").join(key),
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
        })
    }
}

/// Write data to a file atomically
///
/// Writes a sibling temp file, syncs it, then renames it over the target so
/// the target is never left partially written.
fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    fs::rename(&temp_path, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        assert_eq!(storage.get_item("contacts").unwrap(), None);
    }

    #[test]
    fn test_file_storage_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp_dir.path().join("nested").join("store"));

        storage.set_item("contacts", "[]").unwrap();
        assert_eq!(storage.get_item("contacts").unwrap(), Some("[]".to_string()));

        storage.set_item("contacts", "[1]").unwrap();
        assert_eq!(storage.get_item("contacts").unwrap(), Some("[1]".to_string()));

        // No temp file left behind
        assert!(!storage.item_path("contacts").with_extension("tmp").exists());
    }

    #[test]
    fn test_file_storage_unreadable_value() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        std::fs::write(storage.item_path("contacts"), [0xff, 0xfe, 0x00]).unwrap();

        let err = storage.get_item("contacts").unwrap_err();
        assert!(matches!(err, PersistenceError::Read { .. }));
    }

    #[test]
    fn test_memory_storage_shares_state_between_clones() {
        let storage = MemoryStorage::new();
        let mut handle = storage.clone();

        handle.set_item("contacts", "[]").unwrap();
        assert_eq!(storage.get("contacts"), Some("[]".to_string()));
        assert_eq!(storage.get_item("other").unwrap(), None);
    }

    #[test]
    fn test_read_only_storage_refuses_writes() {
        let mut storage = ReadOnlyStorage::new();
        let err = storage.set_item("contacts", "[]").unwrap_err();

        assert!(matches!(err, PersistenceError::Write { .. }));
        assert_eq!(storage.get_item("contacts").unwrap(), None);
    }

    #[test]
    fn test_memory_storage_with_item() {
        let storage = MemoryStorage::with_item("contacts", "not json");
        assert_eq!(
            storage.get_item("contacts").unwrap(),
            Some("not json".to_string())
        );
    }
}
