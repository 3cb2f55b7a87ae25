//! The eight segment labels and their persistence.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{WheelError, WheelResult};
use crate::storage::KeyValueStore;

/// Number of segments on the wheel.
pub const SEGMENT_COUNT: usize = 8;

/// Compiled-in labels used when nothing is persisted.
pub const DEFAULT_LABELS: [&str; SEGMENT_COUNT] = [
    "选项1", "选项2", "选项3", "选项4", "选项5", "选项6", "选项7", "选项8",
];

/// Ordered labels, one per segment, clockwise from the pointer.
///
/// The fixed-size array makes "exactly eight" a type-level invariant;
/// duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet([String; SEGMENT_COUNT]);

impl Default for OptionSet {
    fn default() -> Self {
        Self(DEFAULT_LABELS.map(str::to_string))
    }
}

impl OptionSet {
    /// Build from any list of labels, rejecting lists that are not exactly eight long.
    pub fn from_labels<I, S>(labels: I) -> WheelResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let found = labels.len();
        let labels: [String; SEGMENT_COUNT] = labels
            .try_into()
            .map_err(|_| WheelError::WrongLabelCount { found })?;
        Ok(Self(labels))
    }

    /// All labels in segment order.
    pub fn labels(&self) -> &[String; SEGMENT_COUNT] {
        &self.0
    }

    /// Label for segment `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Always [`SEGMENT_COUNT`].
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Labels joined with `separator`.
    pub fn join(&self, separator: &str) -> String {
        self.0.join(separator)
    }

    /// Whether these are the compiled-in defaults.
    pub fn is_default(&self) -> bool {
        self.0.iter().zip(DEFAULT_LABELS).all(|(a, b)| a == b)
    }

    /// Iterate over the labels.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Loads and saves an [`OptionSet`] under a single key.
#[derive(Debug, Clone)]
pub struct OptionsStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> OptionsStore<S> {
    /// Wrap a key-value store; labels live under `key`.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the backing store.
    pub fn backend(&self) -> &S {
        &self.store
    }

    /// Load persisted labels.
    ///
    /// A missing key yields the defaults. So does an unreadable or malformed
    /// value, which is logged instead of surfaced.
    pub fn load(&self) -> OptionSet {
        match self.try_load() {
            Ok(Some(options)) => {
                debug!(key = %self.key, "Loaded custom options");
                options
            }
            Ok(None) => OptionSet::default(),
            Err(err) => {
                warn!(key = %self.key, error = %err, "Ignoring unreadable persisted options");
                OptionSet::default()
            }
        }
    }

    /// Load persisted labels, reporting storage and parse failures.
    pub fn try_load(&self) -> WheelResult<Option<OptionSet>> {
        match self.store.get(&self.key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Persist `options` as a JSON array.
    pub fn save(&mut self, options: &OptionSet) -> WheelResult<()> {
        let raw = serde_json::to_string(options)?;
        self.store.set(&self.key, &raw)?;
        info!(key = %self.key, "Saved custom options");
        Ok(())
    }

    /// Erase the persisted key.
    pub fn clear(&mut self) -> WheelResult<()> {
        self.store.remove(&self.key)?;
        info!(key = %self.key, "Cleared custom options");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn custom() -> OptionSet {
        OptionSet::from_labels(["a", "b", "c", "d", "e", "f", "g", "h"]).unwrap()
    }

    #[test]
    fn test_default_labels() {
        let options = OptionSet::default();
        assert_eq!(options.len(), 8);
        assert_eq!(options.get(0), Some("选项1"));
        assert_eq!(options.get(7), Some("选项8"));
        assert_eq!(options.get(8), None);
        assert!(options.is_default());
    }

    #[test]
    fn test_from_labels_rejects_wrong_length() {
        for n in [0, 7, 9] {
            let labels: Vec<String> = (0..n).map(|i| i.to_string()).collect();
            match OptionSet::from_labels(labels) {
                Err(WheelError::WrongLabelCount { found }) => assert_eq!(found, n),
                other => panic!("expected WrongLabelCount, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_duplicates_allowed() {
        let options = OptionSet::from_labels(["x"; 8]).unwrap();
        assert!(options.iter().all(|l| l == "x"));
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let json = serde_json::to_string(&custom()).unwrap();
        assert_eq!(json, r#"["a","b","c","d","e","f","g","h"]"#);
    }

    #[test]
    fn test_missing_key_loads_defaults() {
        let store = OptionsStore::new(MemoryStore::default(), "wheelOptions");
        assert_eq!(store.try_load().unwrap(), None);
        assert!(store.load().is_default());
    }

    #[test]
    fn test_round_trip_through_store() {
        let mut store = OptionsStore::new(MemoryStore::default(), "wheelOptions");
        store.save(&custom()).unwrap();

        // Reload through a fresh wrapper over the same backend.
        let reloaded = OptionsStore::new(store.backend().clone(), "wheelOptions").load();
        assert_eq!(reloaded, custom());
    }

    #[test]
    fn test_malformed_value_falls_back_to_defaults() {
        let mut backend = MemoryStore::default();
        backend.set("wheelOptions", r#"["only","three","labels"]"#).unwrap();
        let store = OptionsStore::new(backend, "wheelOptions");

        assert!(store.try_load().is_err());
        assert!(store.load().is_default());
    }

    #[test]
    fn test_clear_removes_key() {
        let mut store = OptionsStore::new(MemoryStore::default(), "wheelOptions");
        store.save(&custom()).unwrap();
        store.clear().unwrap();
        assert!(!store.backend().contains("wheelOptions"));
    }
}
