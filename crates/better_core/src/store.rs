//! Keyed shared state
//!
//! A [`Store`] holds one value per string key and notifies subscribers when a
//! key is written. Widgets that coordinate across instances (tab groups
//! sharing an active tab) share an `Arc<Store<T>>` handed to them by the host;
//! there is no process-wide registry.
//!
//! Callbacks run after the store's locks are released, so a callback may read,
//! write, subscribe or unsubscribe.
//!
//! # Example
//!
//! ```rust
//! use better_core::store::Store;
//!
//! let store: Store<String> = Store::new();
//! store.set("settings-tabs", "profile".to_string());
//! assert_eq!(store.try_get("settings-tabs").as_deref(), Some("profile"));
//! ```

use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    struct SubscriberKey;
}

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Subscriber<T> {
    key: String,
    callback: Callback<T>,
}

pub struct Store<T: Clone + Send + Sync + 'static> {
    values: RwLock<FxHashMap<String, T>>,
    subscribers: RwLock<SlotMap<SubscriberKey, Subscriber<T>>>,
}

impl<T: Clone + Send + Sync + 'static> Store<T> {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(FxHashMap::default()),
            subscribers: RwLock::new(SlotMap::with_key()),
        }
    }

    /// Value under `key`, if one was ever written
    pub fn try_get(&self, key: &str) -> Option<T> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Write `value` and notify the key's subscribers
    pub fn set(&self, key: &str, value: T) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.clone());
        let callbacks: SmallVec<[Callback<T>; 4]> = self
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|s| s.key == key)
            .map(|s| s.callback.clone())
            .collect();
        tracing::trace!(%key, subscribers = callbacks.len(), "store write");
        for callback in callbacks {
            callback(&value);
        }
    }

    /// Call `callback` after every write to `key`
    pub fn subscribe<F>(&self, key: &str, callback: F) -> SubscriptionHandle
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(Subscriber {
                key: key.to_string(),
                callback: Arc::new(callback),
            });
        SubscriptionHandle { id }
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(handle.id)
            .is_some()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + std::fmt::Debug + 'static> std::fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("values", &*self.values.read().unwrap_or_else(PoisonError::into_inner))
            .finish_non_exhaustive()
    }
}

/// Handle for unsubscribing from store writes
#[derive(Debug)]
pub struct SubscriptionHandle {
    id: SubscriberKey,
}
