//! Key-value persistence backends.
//!
//! The browser front-end implements [`KeyValueStore`] over `localStorage`;
//! native builds use [`JsonFileStore`], tests use [`MemoryStore`].

use std::collections::BTreeMap;

use crate::error::WheelResult;

/// Minimal string key-value store, shaped after `window.localStorage`.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> WheelResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> WheelResult<()>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> WheelResult<()>;
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for Box<K> {
    fn get(&self, key: &str) -> WheelResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> WheelResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> WheelResult<()> {
        (**self).remove(key)
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Whether `key` currently has a value.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> WheelResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> WheelResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> WheelResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::path::{Path, PathBuf};

    use tracing::{debug, warn};

    use super::{BTreeMap, KeyValueStore};
    use crate::error::{WheelError, WheelResult};

    /// File name used inside the data directory.
    pub const OPTIONS_FILE: &str = "options.json";

    /// Store backed by a single JSON object on disk.
    ///
    /// The file is re-read on every access so several processes (GUI and CLI)
    /// observe each other's writes.
    #[derive(Debug, Clone)]
    pub struct JsonFileStore {
        path: PathBuf,
    }

    impl JsonFileStore {
        /// Store at an explicit file path.
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// Store at `<dir>/options.json`.
        pub fn in_dir(dir: impl AsRef<Path>) -> Self {
            Self::new(dir.as_ref().join(OPTIONS_FILE))
        }

        /// Path of the backing file.
        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read_all(&self) -> WheelResult<BTreeMap<String, String>> {
            if !self.path.exists() {
                return Ok(BTreeMap::new());
            }
            let contents = std::fs::read_to_string(&self.path)?;
            if contents.trim().is_empty() {
                return Ok(BTreeMap::new());
            }
            Ok(serde_json::from_str(&contents)?)
        }

        /// Entries to rewrite; an unparseable file is replaced wholesale.
        fn read_for_update(&self) -> WheelResult<BTreeMap<String, String>> {
            match self.read_all() {
                Err(WheelError::Json(err)) => {
                    warn!(path = %self.path.display(), error = %err, "Discarding corrupt option store");
                    Ok(BTreeMap::new())
                }
                other => other,
            }
        }

        fn write_all(&self, entries: &BTreeMap<String, String>) -> WheelResult<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = serde_json::to_string_pretty(entries)?;
            std::fs::write(&self.path, contents)?;
            debug!(path = %self.path.display(), "Wrote option store");
            Ok(())
        }
    }

    impl KeyValueStore for JsonFileStore {
        fn get(&self, key: &str) -> WheelResult<Option<String>> {
            Ok(self.read_all()?.remove(key))
        }

        fn set(&mut self, key: &str, value: &str) -> WheelResult<()> {
            let mut entries = self.read_for_update()?;
            entries.insert(key.to_string(), value.to_string());
            self.write_all(&entries)
        }

        fn remove(&mut self, key: &str) -> WheelResult<()> {
            match self.read_all() {
                Ok(mut entries) => {
                    if entries.remove(key).is_some() {
                        self.write_all(&entries)?;
                    }
                    Ok(())
                }
                Err(WheelError::Json(err)) => {
                    warn!(path = %self.path.display(), error = %err, "Discarding corrupt option store");
                    self.write_all(&BTreeMap::new())
                }
                Err(err) => Err(err),
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_set_get_remove() {
        let mut store = MemoryStore::default();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));

        store.remove("k").unwrap();
        assert!(!store.contains("k"));
        store.remove("k").unwrap();
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::in_dir(temp_dir.path());
        store.set("wheelOptions", "[\"a\"]").unwrap();

        let reopened = JsonFileStore::in_dir(temp_dir.path());
        assert_eq!(
            reopened.get("wheelOptions").unwrap().as_deref(),
            Some("[\"a\"]")
        );
    }

    #[test]
    fn test_file_store_missing_file_reads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(temp_dir.path().join("nested/options.json"));
        assert_eq!(store.get("wheelOptions").unwrap(), None);
        store.remove("wheelOptions").unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::in_dir(temp_dir.path());
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_file_store_recovers_from_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::in_dir(temp_dir.path());
        std::fs::write(store.path(), "not json").unwrap();

        assert!(store.get("wheelOptions").is_err());

        store.remove("wheelOptions").unwrap();
        assert_eq!(store.get("wheelOptions").unwrap(), None);

        std::fs::write(store.path(), "not json").unwrap();
        store.set("wheelOptions", "[\"a\"]").unwrap();
        assert_eq!(
            store.get("wheelOptions").unwrap().as_deref(),
            Some("[\"a\"]")
        );
    }
}
