// This module is responsible for the raw persistence of the settings document.
// It defines the `KeyValueStore` seam (the equivalent of the browser's local
// storage), two stores behind it, and the `StorageAdapter` that wraps a store
// so that no storage fault ever escapes as an error.
//
// Key functionalities include:
// - Reading and writing a single string value under a fixed key.
// - Atomic file writes (temporary file + rename) for the on-disk store.
// - Converting every storage fault into an absent/failed sentinel.

use crate::{log_debug, log_warn};
use colored::Colorize;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Fixed key under which the settings document is stored.
pub const SETTINGS_STORAGE_KEY: &str = "el-hornito-settings";

/// Faults a store can report. None of these cross the `StorageAdapter` boundary.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("storage is unavailable: {0}")]
    Unavailable(String),
    #[error("storage quota exceeded")]
    QuotaExceeded,
}

/// A persistent string key-value store.
pub trait KeyValueStore {
    /// Returns `Ok(None)` when the key has never been written or was removed.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Removing a missing key succeeds.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

// ============================================================================
// FILE STORE
// ============================================================================

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // Ensure the store directory exists before attempting to write.
        if !self.dir.exists() {
            log_debug!(
                "[Storage] Creating store directory {}",
                self.dir.display().to_string().cyan()
            );
            fs::create_dir_all(&self.dir)?;
        }

        // Write next to the target and rename over it, so a crash mid-write
        // never leaves a truncated document behind.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.path_for(key)).map_err(|e| e.error)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// MEMORY STORE
// ============================================================================

/// In-process store with switchable fault injection.
///
/// Handy for embedding and for exercising the failure paths of everything
/// layered on top of a store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `value` under `key`.
    pub fn with_item(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    /// When set, every read fails as if storage access were denied.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// When set, every write and removal fails as if the quota were exceeded.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Raw peek that bypasses fault injection.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.get() {
            return Err(StorageError::Unavailable("access denied".to_string()));
        }
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::QuotaExceeded);
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::QuotaExceeded);
        }
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

// Lets callers keep a handle on a store they hand to an adapter.
impl<S: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

// ============================================================================
// STORAGE ADAPTER
// ============================================================================

/// Raw load/save/clear of the settings document against an optional store.
///
/// Without a store (the stateless context) every operation returns the
/// absent/failed sentinel. With a store, every `StorageError` is logged and
/// converted to `None`/`false`.
pub struct StorageAdapter {
    store: Option<Box<dyn KeyValueStore>>,
    key: String,
}

impl StorageAdapter {
    /// Adapter over `store` using the standard settings key.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Some(Box::new(store)),
            key: SETTINGS_STORAGE_KEY.to_string(),
        }
    }

    /// Adapter with no persistent storage behind it.
    pub fn stateless() -> Self {
        Self {
            store: None,
            key: SETTINGS_STORAGE_KEY.to_string(),
        }
    }

    /// Whether a persistent store is attached.
    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    pub fn load_raw(&self) -> Option<String> {
        let store = self.store.as_ref()?;
        match store.get_item(&self.key) {
            Ok(raw) => raw,
            Err(e) => {
                log_warn!("[Storage] Failed to read '{}': {}", self.key, e);
                None
            }
        }
    }

    pub fn save_raw(&self, text: &str) -> bool {
        let Some(store) = self.store.as_ref() else {
            return false;
        };
        match store.set_item(&self.key, text) {
            Ok(()) => {
                log_debug!("[Storage] Wrote {} bytes to '{}'", text.len(), self.key);
                true
            }
            Err(e) => {
                log_warn!("[Storage] Failed to write '{}': {}", self.key, e);
                false
            }
        }
    }

    pub fn clear(&self) -> bool {
        let Some(store) = self.store.as_ref() else {
            return false;
        };
        match store.remove_item(&self.key) {
            Ok(()) => true,
            Err(e) => {
                log_warn!("[Storage] Failed to remove '{}': {}", self.key, e);
                false
            }
        }
    }

    pub fn has(&self) -> bool {
        self.load_raw().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn file_store_round_trips_and_removes() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get_item("k").unwrap(), None);
        store.set_item("k", "{\"a\":1}").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(dir.path().join("nested").join("k.json").exists());

        store.set_item("k", "second").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("second"));

        store.remove_item("k").unwrap();
        assert_eq!(store.get_item("k").unwrap(), None);
        // Removing twice is fine.
        store.remove_item("k").unwrap();
    }

    #[test]
    fn file_store_read_of_a_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("k.json")).unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.get_item("k").is_err());
    }

    #[test]
    fn stateless_adapter_returns_sentinels() {
        let adapter = StorageAdapter::stateless();
        assert!(!adapter.is_available());
        assert_eq!(adapter.load_raw(), None);
        assert!(!adapter.save_raw("{}"));
        assert!(!adapter.clear());
        assert!(!adapter.has());
    }

    #[test]
    fn adapter_swallows_store_faults() {
        let store = Rc::new(MemoryStore::with_item(SETTINGS_STORAGE_KEY, "stored"));
        let adapter = StorageAdapter::new(Rc::clone(&store));
        assert!(adapter.has());

        store.set_fail_reads(true);
        assert_eq!(adapter.load_raw(), None);
        assert!(!adapter.has());

        store.set_fail_writes(true);
        assert!(!adapter.save_raw("new"));
        assert!(!adapter.clear());
        assert_eq!(store.peek(SETTINGS_STORAGE_KEY).as_deref(), Some("stored"));
    }

    #[test]
    fn adapter_writes_under_the_settings_key() {
        let store = Rc::new(MemoryStore::new());
        let adapter = StorageAdapter::new(Rc::clone(&store));
        assert!(!adapter.has());
        assert!(adapter.save_raw("doc"));
        assert_eq!(store.peek(SETTINGS_STORAGE_KEY).as_deref(), Some("doc"));
        assert!(adapter.clear());
        assert!(store.peek(SETTINGS_STORAGE_KEY).is_none());
    }
}
