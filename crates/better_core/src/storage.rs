//! Local-storage style value mirroring
//!
//! Widgets can optionally mirror a value into a string key/value backend (the
//! browser's `localStorage` on the web, anything else elsewhere). Values are
//! stored as JSON. Reading happens once when the mirror is created; every
//! `set` writes through.

use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Errors from mirroring a value into storage
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to serialize value for storage key `{key}`")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("stored value for key `{key}` could not be decoded")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// String key/value storage
pub trait StorageBackend: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: String);
    fn remove_item(&self, key: &str);
}

/// In-process storage backend
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<FxHashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: String) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
    }

    fn remove_item(&self, key: &str) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// A value mirrored into a storage key
pub struct Mirrored<T> {
    key: String,
    backend: Arc<dyn StorageBackend>,
    value: T,
}

impl<T: Serialize + DeserializeOwned> Mirrored<T> {
    /// Load from storage, failing on an undecodable stored value
    pub fn try_load(
        key: impl Into<String>,
        backend: Arc<dyn StorageBackend>,
        default: T,
    ) -> Result<Self, StorageError> {
        let key = key.into();
        let value = match backend.get_item(&key) {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StorageError::Deserialize {
                key: key.clone(),
                source,
            })?,
            None => default,
        };
        Ok(Self {
            key,
            backend,
            value,
        })
    }

    /// Load from storage, falling back to `default` on a corrupt entry
    pub fn load(key: impl Into<String>, backend: Arc<dyn StorageBackend>, default: T) -> Self {
        let key = key.into();
        let value = match backend.get_item(&key) {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(%key, error = %err, "ignoring undecodable stored value");
                    default
                }
            },
            None => default,
        };
        Self {
            key,
            backend,
            value,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the value and write it through
    pub fn set(&mut self, value: T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&value).map_err(|source| StorageError::Serialize {
            key: self.key.clone(),
            source,
        })?;
        self.backend.set_item(&self.key, raw);
        self.value = value;
        Ok(())
    }

    /// Remove the stored entry, keeping the in-memory value
    pub fn forget(&self) {
        self.backend.remove_item(&self.key);
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Mirrored<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mirrored")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_round_trip() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryStorage::new());
        let mut mirrored = Mirrored::load("tabs:active", backend.clone(), "home".to_string());
        assert_eq!(mirrored.get(), "home");

        mirrored.set("billing".to_string()).unwrap();
        assert_eq!(backend.get_item("tabs:active").as_deref(), Some("\"billing\""));

        let reloaded = Mirrored::load("tabs:active", backend, "home".to_string());
        assert_eq!(reloaded.get(), "billing");
    }

    #[test]
    fn test_corrupt_entry() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item("count", "not json".into());
        let backend: Arc<dyn StorageBackend> = storage.clone();

        let mirrored = Mirrored::load("count", backend.clone(), 3u32);
        assert_eq!(*mirrored.get(), 3);

        let err = Mirrored::try_load("count", backend, 3u32).unwrap_err();
        assert!(matches!(err, StorageError::Deserialize { ref key, .. } if key == "count"));
    }

    #[test]
    fn test_forget() {
        let storage = Arc::new(MemoryStorage::new());
        let mut mirrored = Mirrored::load("flag", storage.clone() as Arc<dyn StorageBackend>, false);
        mirrored.set(true).unwrap();
        assert_eq!(storage.len(), 1);
        mirrored.forget();
        assert!(storage.is_empty());
        assert!(*mirrored.get());
    }
}
