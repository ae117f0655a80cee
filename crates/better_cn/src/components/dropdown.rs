//! Dropdown - single selection from an option list
//!
//! Two variants share one configuration:
//!
//! - [`dropdown`]: a read-only trigger, Space acts like Enter
//! - [`searchable`]: the trigger doubles as a search box filtering the options
//!
//! # Example
//!
//! ```rust
//! use better_cn::prelude::*;
//! use better_core::{EventDispatcher, KeyCode, KeyEvent, NodeTree};
//!
//! let ctx = ThemeContext::default();
//! let mut tree = NodeTree::new();
//! let bounds = tree.create_root();
//! let mut events = EventDispatcher::new();
//!
//! let mut fruit = cn::dropdown(&ctx, bounds)
//!     .option("Apple", 1)
//!     .option("Banana", 2)
//!     .placeholder("Pick a fruit");
//!
//! fruit.handle_key(&mut KeyEvent::new(KeyCode::ArrowDown), 0, &mut events);
//! fruit.handle_key(&mut KeyEvent::new(KeyCode::ArrowDown), 10, &mut events);
//! fruit.handle_key(&mut KeyEvent::new(KeyCode::Enter), 20, &mut events);
//! assert_eq!(fruit.value(), Some(&1));
//! assert_eq!(fruit.selected_label(), Some("Apple"));
//! ```

use std::sync::Arc;

use better_core::{EventDispatcher, InstanceKey, KeyEvent, NodeId, NodeTree, PointerEvent};
use better_theme::ThemeContext;
use smallvec::SmallVec;

use crate::field::{Field, InputSurface};
use crate::list_nav::{ListNavigator, NavOutcome};

/// An entry in the option list
#[derive(Clone, Debug, PartialEq)]
pub struct DropdownOption<V> {
    pub label: String,
    pub value: V,
    pub disabled: bool,
    /// Extra terms the search matches besides the label
    pub search_tokens: SmallVec<[String; 2]>,
}

impl<V> DropdownOption<V> {
    pub fn new(label: impl Into<String>, value: V) -> Self {
        Self {
            label: label.into(),
            value,
            disabled: false,
            search_tokens: SmallVec::new(),
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn search_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_tokens.extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Case-insensitive substring match against the label and search tokens
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        std::iter::once(&self.label)
            .chain(self.search_tokens.iter())
            .any(|term| term.to_lowercase().contains(&query))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DropdownKind {
    #[default]
    Plain,
    Searchable,
}

pub struct Dropdown<V> {
    key: InstanceKey,
    kind: DropdownKind,
    options: Vec<DropdownOption<V>>,
    field: Field<V>,
    navigator: ListNavigator,
    placeholder: String,
    disabled: bool,
}

impl<V: Clone + PartialEq> Dropdown<V> {
    #[track_caller]
    fn with_kind(ctx: &ThemeContext, bounds: NodeId, kind: DropdownKind) -> Self {
        let key = InstanceKey::new("dropdown");
        let field = Field::new(ctx, bounds, key.get());
        Self {
            key,
            kind,
            options: Vec::new(),
            field,
            navigator: ListNavigator::new().space_commits(kind == DropdownKind::Plain),
            placeholder: String::new(),
            disabled: false,
        }
    }

    // -------------------------------------------------------------------------
    // Builder
    // -------------------------------------------------------------------------

    pub fn option(mut self, label: impl Into<String>, value: V) -> Self {
        self.options.push(DropdownOption::new(label, value));
        self
    }

    pub fn option_disabled(mut self, label: impl Into<String>, value: V) -> Self {
        self.options.push(DropdownOption::new(label, value).disabled());
        self
    }

    pub fn options(mut self, options: impl IntoIterator<Item = DropdownOption<V>>) -> Self {
        self.options.extend(options);
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Initial selection of an uncontrolled dropdown
    pub fn default_value(mut self, value: V) -> Self {
        self.field.binding_mut().write(Some(value));
        self
    }

    /// Owner-controlled selection; update it with [`set_value`](Self::set_value)
    pub fn value_controlled(mut self, value: V) -> Self {
        self.field.binding_mut().set_external(Some(value));
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(Option<V>) + Send + Sync + 'static,
    {
        self.field.callbacks_mut().on_change = Some(Arc::new(callback));
        self
    }

    pub fn on_open<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.field.callbacks_mut().on_open = Some(Arc::new(callback));
        self
    }

    pub fn on_close<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.field.callbacks_mut().on_close = Some(Arc::new(callback));
        self
    }

    // -------------------------------------------------------------------------
    // State
    // -------------------------------------------------------------------------

    pub fn key(&self) -> &str {
        self.key.get()
    }

    pub fn kind(&self) -> DropdownKind {
        self.kind
    }

    pub fn value(&self) -> Option<&V> {
        self.field.value()
    }

    /// Owner update of a controlled dropdown (`None` hands control back)
    pub fn set_value(&mut self, value: Option<V>) {
        self.field.binding_mut().set_external(value);
    }

    pub fn all_options(&self) -> &[DropdownOption<V>] {
        &self.options
    }

    /// Option whose value is the current selection
    pub fn selected(&self) -> Option<&DropdownOption<V>> {
        let value = self.value()?;
        self.options.iter().find(|o| &o.value == value)
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.selected().map(|o| o.label.as_str())
    }

    /// Options matching the search query, in list order
    pub fn filtered(&self) -> Vec<&DropdownOption<V>> {
        let query = self.field.search_query();
        self.options.iter().filter(|o| o.matches(query)).collect()
    }

    pub fn search_query(&self) -> &str {
        self.field.search_query()
    }

    /// Index into [`filtered`](Self::filtered)
    pub fn focused_index(&self) -> Option<usize> {
        self.field.focused_index()
    }

    pub fn focused_option(&self) -> Option<&DropdownOption<V>> {
        let index = self.focused_index()?;
        self.filtered().get(index).copied()
    }

    pub fn is_open(&self) -> bool {
        self.field.is_open()
    }

    pub fn is_mounted(&self) -> bool {
        self.field.is_mounted()
    }

    pub fn has_focus(&self) -> bool {
        self.field.has_focus()
    }

    pub fn is_listening(&self) -> bool {
        self.field.is_listening()
    }

    /// What the trigger input shows
    pub fn surface(&self) -> InputSurface {
        let showing_search = self.kind == DropdownKind::Searchable && self.is_open();
        let value = if showing_search {
            self.search_query().to_string()
        } else {
            self.selected_label().unwrap_or_default().to_string()
        };
        InputSurface {
            value,
            placeholder: self.placeholder.clone(),
            read_only: self.kind == DropdownKind::Plain,
            disabled: self.disabled,
            focused: self.has_focus(),
        }
    }

    // -------------------------------------------------------------------------
    // Interaction
    // -------------------------------------------------------------------------

    pub fn open(&mut self, now_ms: u64, events: &mut EventDispatcher) -> bool {
        if self.disabled {
            return false;
        }
        self.field.open(now_ms, events)
    }

    pub fn close(&mut self, now_ms: u64, events: &mut EventDispatcher) -> bool {
        self.field.close(now_ms, events)
    }

    /// Trigger click
    pub fn toggle(&mut self, now_ms: u64, events: &mut EventDispatcher) -> bool {
        if self.is_open() {
            self.close(now_ms, events)
        } else {
            self.open(now_ms, events)
        }
    }

    pub fn focus(&mut self) {
        if !self.disabled {
            self.field.focus();
        }
    }

    pub fn blur(&mut self) {
        self.field.blur();
    }

    /// Typing into a searchable trigger; opens the list and resets focus
    pub fn set_search(&mut self, query: impl Into<String>, now_ms: u64, events: &mut EventDispatcher) {
        if self.kind != DropdownKind::Searchable || self.disabled {
            return;
        }
        self.open(now_ms, events);
        self.field.set_search_query(query);
    }

    /// Commit the `index`-th filtered option (option click)
    pub fn select(&mut self, index: usize, now_ms: u64, events: &mut EventDispatcher) -> bool {
        let Some(option) = self.filtered().get(index).map(|o| (o.value.clone(), o.disabled)) else {
            return false;
        };
        let (value, disabled) = option;
        self.field.commit(Some(value), disabled, now_ms, events)
    }

    pub fn clear(&mut self, now_ms: u64, events: &mut EventDispatcher) -> bool {
        if self.disabled {
            return false;
        }
        self.field.clear(now_ms, events)
    }

    /// Key-down on the trigger
    pub fn handle_key(&mut self, event: &mut KeyEvent, now_ms: u64, events: &mut EventDispatcher) -> NavOutcome {
        if self.disabled {
            return NavOutcome::Ignored;
        }
        let filtered: SmallVec<[bool; 16]> = self.filtered().iter().map(|o| o.disabled).collect();
        let outcome = self.navigator.handle(
            event,
            self.is_open(),
            self.focused_index(),
            filtered.len(),
            |i| !filtered[i],
        );
        match outcome {
            NavOutcome::Open => {
                self.open(now_ms, events);
            }
            NavOutcome::Close => {
                self.close(now_ms, events);
            }
            NavOutcome::Focus(index) => self.field.set_focused_index(Some(index)),
            NavOutcome::Commit(index) => {
                self.select(index, now_ms, events);
            }
            NavOutcome::Ignored => {}
        }
        outcome
    }

    /// Document pointer-down, delivered before click handlers
    pub fn handle_pointer_down(
        &mut self,
        event: &PointerEvent,
        tree: &NodeTree,
        now_ms: u64,
        events: &mut EventDispatcher,
    ) -> bool {
        self.field.handle_pointer_down(event, tree, now_ms, events)
    }

    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.field.tick(now_ms)
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.field.popover().next_deadline()
    }

    pub fn teardown(&mut self, events: &mut EventDispatcher) {
        self.field.teardown(events);
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for Dropdown<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dropdown")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("options", &self.options.len())
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

/// Read-only dropdown
#[track_caller]
pub fn dropdown<V: Clone + PartialEq>(ctx: &ThemeContext, bounds: NodeId) -> Dropdown<V> {
    Dropdown::with_kind(ctx, bounds, DropdownKind::Plain)
}

/// Dropdown whose trigger filters the options as the user types
#[track_caller]
pub fn searchable<V: Clone + PartialEq>(ctx: &ThemeContext, bounds: NodeId) -> Dropdown<V> {
    Dropdown::with_kind(ctx, bounds, DropdownKind::Searchable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use better_core::KeyCode;
    use std::sync::Mutex;

    struct Env {
        tree: NodeTree,
        events: EventDispatcher,
        bounds: NodeId,
        option_node: NodeId,
        outside: NodeId,
    }

    fn env() -> Env {
        let mut tree = NodeTree::new();
        let root = tree.create_root();
        let bounds = tree.create_child(root).unwrap();
        let option_node = tree.create_child(bounds).unwrap();
        let outside = tree.create_child(root).unwrap();
        Env {
            tree,
            events: EventDispatcher::new(),
            bounds,
            option_node,
            outside,
        }
    }

    fn key(dropdown: &mut Dropdown<u32>, code: KeyCode, now: u64, events: &mut EventDispatcher) -> NavOutcome {
        dropdown.handle_key(&mut KeyEvent::new(code), now, events)
    }

    #[test]
    fn test_option_matching() {
        let option = DropdownOption::new("United Kingdom", "uk").search_tokens(["GB", "Britain"]);
        assert!(option.matches(""));
        assert!(option.matches("king"));
        assert!(option.matches("gb"));
        assert!(option.matches("BRIT"));
        assert!(!option.matches("france"));
    }

    #[test]
    fn test_disabled_focus_enter_stays_open() {
        let mut env = env();
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = changes.clone();
        let mut dd = dropdown(&ThemeContext::default(), env.bounds)
            .option("A", 1u32)
            .option_disabled("B", 2)
            .on_change(move |v| sink.lock().unwrap().push(v));

        assert_eq!(key(&mut dd, KeyCode::ArrowDown, 0, &mut env.events), NavOutcome::Open);
        assert!(dd.is_open());
        assert_eq!(dd.focused_index(), None);
        assert_eq!(key(&mut dd, KeyCode::ArrowDown, 10, &mut env.events), NavOutcome::Focus(0));
        assert_eq!(key(&mut dd, KeyCode::ArrowDown, 20, &mut env.events), NavOutcome::Focus(1));
        assert_eq!(key(&mut dd, KeyCode::Enter, 30, &mut env.events), NavOutcome::Ignored);

        assert!(dd.is_open());
        assert_eq!(dd.value(), None);
        assert!(changes.lock().unwrap().is_empty());
        assert_eq!(dd.focused_index(), Some(1));
    }

    #[test]
    fn test_keyboard_commit_closes_and_notifies() {
        let mut env = env();
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = changes.clone();
        let mut dd = dropdown(&ThemeContext::default(), env.bounds)
            .option("A", 1u32)
            .option("B", 2)
            .on_change(move |v| sink.lock().unwrap().push(v));
        dd.focus();

        key(&mut dd, KeyCode::Enter, 0, &mut env.events);
        key(&mut dd, KeyCode::ArrowUp, 5, &mut env.events);
        assert_eq!(dd.focused_option().map(|o| o.value), Some(2));
        assert_eq!(key(&mut dd, KeyCode::Space, 10, &mut env.events), NavOutcome::Commit(1));

        assert_eq!(dd.value(), Some(&2));
        assert_eq!(dd.surface().value, "B");
        assert!(!dd.is_open());
        assert!(!dd.has_focus());
        assert_eq!(*changes.lock().unwrap(), vec![Some(2)]);
        assert_eq!(env.events.listener_count(), 0);

        assert!(dd.is_mounted());
        assert_eq!(dd.next_deadline(), Some(210));
        assert!(dd.tick(210));
        assert!(!dd.is_mounted());
    }

    #[test]
    fn test_search_filters_and_resets_focus() {
        let mut env = env();
        let mut dd = searchable(&ThemeContext::default(), env.bounds).options([
            DropdownOption::new("Germany", 49u32).search_tokens(["DE"]),
            DropdownOption::new("France", 33),
            DropdownOption::new("Georgia", 995),
        ]);

        dd.set_search("ge", 0, &mut env.events);
        assert!(dd.is_open());
        assert_eq!(dd.surface().value, "ge");
        let labels: Vec<_> = dd.filtered().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Germany", "Georgia"]);

        key(&mut dd, KeyCode::ArrowDown, 1, &mut env.events);
        assert_eq!(dd.focused_index(), Some(0));
        dd.set_search("geo", 2, &mut env.events);
        assert_eq!(dd.focused_index(), None);

        // Space is text in a searchable dropdown
        assert_eq!(key(&mut dd, KeyCode::Space, 3, &mut env.events), NavOutcome::Ignored);

        key(&mut dd, KeyCode::ArrowDown, 4, &mut env.events);
        key(&mut dd, KeyCode::Enter, 5, &mut env.events);
        assert_eq!(dd.value(), Some(&995));
        assert_eq!(dd.search_query(), "");
        assert_eq!(dd.surface().value, "Georgia");
    }

    #[test]
    fn test_outside_pointer_down_closes_before_click() {
        let mut env = env();
        let mut dd = searchable(&ThemeContext::default(), env.bounds)
            .option("A", 1u32)
            .option("B", 2);
        dd.set_search("a", 0, &mut env.events);

        let inside = PointerEvent::new(env.option_node);
        assert!(!dd.handle_pointer_down(&inside, &env.tree, 5, &mut env.events));
        assert!(dd.is_open());

        let outside = PointerEvent::new(env.outside);
        assert!(dd.handle_pointer_down(&outside, &env.tree, 10, &mut env.events));
        assert!(!dd.is_open());
        assert_eq!(dd.search_query(), "");
        assert_eq!(dd.focused_index(), None);
        assert!(!dd.is_listening());
    }

    #[test]
    fn test_controlled_dropdown() {
        let mut env = env();
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = changes.clone();
        let mut dd = dropdown(&ThemeContext::default(), env.bounds)
            .option("A", 1u32)
            .option("B", 2)
            .value_controlled(1)
            .on_change(move |v| sink.lock().unwrap().push(v));

        dd.open(0, &mut env.events);
        assert!(dd.select(1, 10, &mut env.events));
        assert_eq!(dd.value(), Some(&1));
        assert_eq!(*changes.lock().unwrap(), vec![Some(2)]);

        dd.set_value(Some(2));
        assert_eq!(dd.selected_label(), Some("B"));

        assert!(dd.clear(20, &mut env.events));
        assert_eq!(changes.lock().unwrap().last(), Some(&None));
        assert_eq!(dd.value(), Some(&2));
    }

    #[test]
    fn test_escape_and_disabled() {
        let mut env = env();
        let mut dd = dropdown(&ThemeContext::default(), env.bounds)
            .option("A", 1u32)
            .default_value(1);
        assert_eq!(dd.selected_label(), Some("A"));

        key(&mut dd, KeyCode::ArrowDown, 0, &mut env.events);
        key(&mut dd, KeyCode::ArrowDown, 1, &mut env.events);
        assert_eq!(key(&mut dd, KeyCode::Escape, 2, &mut env.events), NavOutcome::Close);
        assert!(!dd.is_open());
        assert_eq!(dd.focused_index(), None);

        let mut off = dropdown::<u32>(&ThemeContext::default(), env.bounds)
            .option("A", 1)
            .disabled(true);
        assert_eq!(key(&mut off, KeyCode::ArrowDown, 0, &mut env.events), NavOutcome::Ignored);
        assert!(!off.open(0, &mut env.events));
        assert!(off.surface().disabled);
    }

    #[test]
    fn test_teardown_detaches_listener() {
        let mut env = env();
        let mut dd = dropdown(&ThemeContext::default(), env.bounds).option("A", 1u32);
        dd.open(0, &mut env.events);
        assert_eq!(env.events.listener_count(), 1);
        assert!(env.events.owner(env.events.listeners(better_core::ListenerKind::PointerDown)[0])
            .is_some_and(|owner| owner.starts_with("dropdown:")));
        dd.teardown(&mut env.events);
        assert_eq!(env.events.listener_count(), 0);
        assert!(!dd.is_mounted());
    }
}
