//! Tabs - one active tab out of an ordered set
//!
//! The active tab resolves as `controlled ?? group ?? stored ?? internal ??
//! first enabled tab`:
//!
//! - a *group* shares the active tab with every other [`Tabs`] using the same
//!   group name on the same [`Store`]; a selection in one member fires
//!   `on_change` on the others too
//! - [`persist`](Tabs::persist) mirrors the active tab into a storage backend
//!   so it survives a reload
//!
//! # Example
//!
//! ```rust
//! use better_cn::prelude::*;
//! use better_core::{KeyCode, KeyEvent};
//!
//! let mut settings = cn::tabs()
//!     .tab("account", "Account")
//!     .tab_item(cn::tab_item("billing").label("Billing").disabled())
//!     .tab("security", "Security");
//!
//! assert_eq!(settings.active(), Some("account".to_string()));
//! settings.handle_key(&mut KeyEvent::new(KeyCode::ArrowRight));
//! assert_eq!(settings.active(), Some("security".to_string()));
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use better_core::{
    KeyCode, KeyEvent, Mirrored, Modifiers, StorageBackend, Store, SubscriptionHandle, ValueBinding,
};

use crate::field::ChangeHandler;

/// Shared active-tab state for tab groups, keyed by group name
pub type TabGroupStore = Store<Option<String>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabItem {
    value: String,
    label: String,
    /// Small attention dot next to the label
    dot: bool,
    disabled: bool,
}

impl TabItem {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
            dot: false,
            disabled: false,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn dot(mut self) -> Self {
        self.dot = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn label_text(&self) -> &str {
        &self.label
    }

    pub fn has_dot(&self) -> bool {
        self.dot
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

/// Create a tab item with the given value
pub fn tab_item(value: impl Into<String>) -> TabItem {
    TabItem::new(value)
}

struct GroupLink {
    store: Arc<TabGroupStore>,
    name: String,
    /// Raised while this member writes so its own write is not echoed back
    writing: Arc<AtomicBool>,
    subscription: Option<SubscriptionHandle>,
}

impl GroupLink {
    fn unsubscribe(&mut self) {
        if let Some(handle) = self.subscription.take() {
            self.store.unsubscribe(handle);
        }
    }
}

#[derive(Default)]
pub struct Tabs {
    items: Vec<TabItem>,
    binding: ValueBinding<String>,
    group: Option<GroupLink>,
    stored: Option<Mirrored<Option<String>>>,
    on_change: Option<ChangeHandler<String>>,
}

impl Tabs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.items.push(TabItem::new(value).label(label));
        self
    }

    pub fn tab_item(mut self, item: TabItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.binding.write(Some(value.into()));
        self
    }

    pub fn value_controlled(mut self, value: impl Into<String>) -> Self {
        self.binding.set_external(Some(value.into()));
        self
    }

    /// Share the active tab with other tabs in `name` on `store`
    pub fn group(mut self, store: Arc<TabGroupStore>, name: impl Into<String>) -> Self {
        if let Some(previous) = &mut self.group {
            previous.unsubscribe();
        }
        self.group = Some(GroupLink {
            store,
            name: name.into(),
            writing: Arc::new(AtomicBool::new(false)),
            subscription: None,
        });
        self.link_group();
        self
    }

    /// Mirror the active tab into `backend` under `key`
    pub fn persist(mut self, backend: Arc<dyn StorageBackend>, key: impl Into<String>) -> Self {
        self.stored = Some(Mirrored::load(key, backend, None));
        self
    }

    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(Option<String>) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(callback));
        self.link_group();
        self
    }

    /// Forward writes by other group members to `on_change`
    fn link_group(&mut self) {
        let (Some(group), Some(on_change)) = (&mut self.group, &self.on_change) else {
            return;
        };
        group.unsubscribe();
        let on_change = on_change.clone();
        let writing = group.writing.clone();
        let handle = group.store.subscribe(&group.name, move |value: &Option<String>| {
            if !writing.load(Ordering::SeqCst) {
                on_change(value.clone());
            }
        });
        group.subscription = Some(handle);
    }

    pub fn items(&self) -> &[TabItem] {
        &self.items
    }

    /// Owner update of controlled tabs (`None` hands control back)
    pub fn set_value(&mut self, value: Option<String>) {
        self.binding.set_external(value);
    }

    fn find_enabled(&self, value: &str) -> Option<&TabItem> {
        self.items.iter().find(|t| t.value == value && !t.disabled)
    }

    /// The active tab value
    pub fn active(&self) -> Option<String> {
        if self.binding.is_controlled() {
            return self.binding.get_cloned();
        }
        let group = self
            .group
            .as_ref()
            .and_then(|g| g.store.try_get(&g.name).flatten());
        let stored = self.stored.as_ref().and_then(|m| m.get().clone());
        group
            .into_iter()
            .chain(stored)
            .chain(self.binding.get_cloned())
            .find(|value| self.find_enabled(value).is_some())
            .or_else(|| self.items.iter().find(|t| !t.disabled).map(|t| t.value.clone()))
    }

    pub fn is_active(&self, value: &str) -> bool {
        self.active().as_deref() == Some(value)
    }

    /// Activate `value`. Unknown and disabled tabs are ignored.
    pub fn select(&mut self, value: &str) -> bool {
        if self.find_enabled(value).is_none() {
            tracing::debug!(%value, "ignoring selection of unknown or disabled tab");
            return false;
        }
        if self.active().as_deref() == Some(value) {
            return false;
        }
        let value = value.to_string();
        if !self.binding.is_controlled() {
            self.binding.write(Some(value.clone()));
            if let Some(group) = &self.group {
                group.writing.store(true, Ordering::SeqCst);
                group.store.set(&group.name, Some(value.clone()));
                group.writing.store(false, Ordering::SeqCst);
            }
            if let Some(stored) = &mut self.stored {
                if let Err(err) = stored.set(Some(value.clone())) {
                    tracing::warn!(error = %err, "failed to persist active tab");
                }
            }
        }
        if let Some(on_change) = &self.on_change {
            on_change(Some(value));
        }
        true
    }

    /// Arrow keys move between enabled tabs with wrap; Home/End jump to the ends.
    /// Chords with Ctrl, Alt or Meta are left to the host.
    pub fn handle_key(&mut self, event: &mut KeyEvent) -> bool {
        if event
            .modifiers
            .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META)
        {
            return false;
        }
        let enabled: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.disabled)
            .map(|(i, _)| i)
            .collect();
        if enabled.is_empty() {
            return false;
        }
        let active = self.active();
        let current = enabled
            .iter()
            .position(|&i| Some(self.items[i].value.as_str()) == active.as_deref());
        let last = enabled.len() - 1;
        let target = match (event.key, current) {
            (KeyCode::ArrowRight, Some(pos)) => enabled[(pos + 1) % enabled.len()],
            (KeyCode::ArrowLeft, Some(pos)) => enabled[(pos + last) % enabled.len()],
            (KeyCode::ArrowRight, None) | (KeyCode::Home, _) => enabled[0],
            (KeyCode::ArrowLeft, None) | (KeyCode::End, _) => enabled[last],
            _ => return false,
        };
        event.prevent_default();
        let value = self.items[target].value.clone();
        self.select(&value)
    }
}

impl std::fmt::Debug for Tabs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tabs")
            .field("items", &self.items)
            .field("binding", &self.binding)
            .field("group", &self.group.as_ref().map(|g| &g.name))
            .field("stored", &self.stored)
            .finish_non_exhaustive()
    }
}

impl Drop for Tabs {
    fn drop(&mut self) {
        if let Some(group) = &mut self.group {
            group.unsubscribe();
        }
    }
}

pub fn tabs() -> Tabs {
    Tabs::new()
}
