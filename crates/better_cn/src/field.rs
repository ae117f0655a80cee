//! Field adapter and commit protocol
//!
//! [`Field`] is the shared core of every popover-backed field (dropdowns and
//! the date/time inputs). It owns the selection binding, the popover
//! lifecycle, the outside-click detector and the transient view state
//! (search query, focused index, input focus), and runs the commit protocol:
//!
//! 1. a disabled item is a no-op
//! 2. the internal selection is written only when uncontrolled
//! 3. `on_change` always fires with the new value
//! 4. the popover closes
//! 5. search query and focused index are cleared
//! 6. the input loses focus
//!
//! Closing for any reason resets the view state.

use std::sync::Arc;

use better_core::{EventDispatcher, NodeId, NodeTree, PointerEvent, ValueBinding};
use better_theme::ThemeContext;

use crate::outside_click::OutsideClick;
use crate::popover::Popover;

/// Value-change callback; receives `None` when the field is cleared
pub type ChangeHandler<V> = Arc<dyn Fn(Option<V>) + Send + Sync>;

/// Open/close notification
pub type Handler = Arc<dyn Fn() + Send + Sync>;

/// Caller callbacks shared by the field widgets
pub struct FieldCallbacks<V> {
    pub on_change: Option<ChangeHandler<V>>,
    pub on_open: Option<Handler>,
    pub on_close: Option<Handler>,
}

impl<V> Default for FieldCallbacks<V> {
    fn default() -> Self {
        Self {
            on_change: None,
            on_open: None,
            on_close: None,
        }
    }
}

impl<V> Clone for FieldCallbacks<V> {
    fn clone(&self) -> Self {
        Self {
            on_change: self.on_change.clone(),
            on_open: self.on_open.clone(),
            on_close: self.on_close.clone(),
        }
    }
}

impl<V> std::fmt::Debug for FieldCallbacks<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldCallbacks")
            .field("on_change", &self.on_change.is_some())
            .field("on_open", &self.on_open.is_some())
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

/// What a text-input-shaped host element needs to render a field
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputSurface {
    pub value: String,
    pub placeholder: String,
    pub read_only: bool,
    pub disabled: bool,
    pub focused: bool,
}

pub struct Field<V> {
    binding: ValueBinding<V>,
    popover: Popover,
    detector: OutsideClick,
    search_query: String,
    focused_index: Option<usize>,
    input_focused: bool,
    callbacks: FieldCallbacks<V>,
}

impl<V: Clone> Field<V> {
    /// Field bounded by `bounds`, with the exit delay from `ctx`
    pub fn new(ctx: &ThemeContext, bounds: NodeId, owner: impl Into<String>) -> Self {
        Self {
            binding: ValueBinding::default(),
            popover: Popover::from_context(ctx),
            detector: OutsideClick::new(bounds, owner),
            search_query: String::new(),
            focused_index: None,
            input_focused: false,
            callbacks: FieldCallbacks::default(),
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// The effective selection
    pub fn value(&self) -> Option<&V> {
        self.binding.get()
    }

    pub fn binding(&self) -> &ValueBinding<V> {
        &self.binding
    }

    pub fn binding_mut(&mut self) -> &mut ValueBinding<V> {
        &mut self.binding
    }

    pub fn callbacks(&self) -> &FieldCallbacks<V> {
        &self.callbacks
    }

    pub fn callbacks_mut(&mut self) -> &mut FieldCallbacks<V> {
        &mut self.callbacks
    }

    /// Run the commit protocol for `value`. Returns `false` for a disabled item.
    pub fn commit(&mut self, value: Option<V>, disabled: bool, now_ms: u64, events: &mut EventDispatcher) -> bool {
        if disabled {
            tracing::debug!("commit of disabled item ignored");
            return false;
        }
        if !self.binding.write(value.clone()) {
            tracing::trace!("controlled field, internal selection left untouched");
        }
        if let Some(on_change) = &self.callbacks.on_change {
            on_change(value);
        }
        self.close(now_ms, events);
        self.reset_view();
        self.blur();
        true
    }

    /// Commit an absent value
    pub fn clear(&mut self, now_ms: u64, events: &mut EventDispatcher) -> bool {
        self.commit(None, false, now_ms, events)
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    pub fn popover(&self) -> &Popover {
        &self.popover
    }

    pub fn is_open(&self) -> bool {
        self.popover.is_open()
    }

    pub fn is_mounted(&self) -> bool {
        self.popover.is_mounted()
    }

    pub fn open(&mut self, now_ms: u64, events: &mut EventDispatcher) -> bool {
        if !self.popover.open(now_ms) {
            return false;
        }
        self.detector.sync(true, events);
        if let Some(on_open) = &self.callbacks.on_open {
            on_open();
        }
        true
    }

    pub fn close(&mut self, now_ms: u64, events: &mut EventDispatcher) -> bool {
        let closed = self.popover.close(now_ms);
        self.detector.sync(false, events);
        self.reset_view();
        if closed {
            if let Some(on_close) = &self.callbacks.on_close {
                on_close();
            }
        }
        closed
    }

    pub fn toggle(&mut self, now_ms: u64, events: &mut EventDispatcher) -> bool {
        if self.is_open() {
            self.close(now_ms, events)
        } else {
            self.open(now_ms, events)
        }
    }

    /// Apply the delayed unmount
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.popover.tick(now_ms)
    }

    /// Close on a pointer-down outside the field. Returns whether it closed.
    pub fn handle_pointer_down(
        &mut self,
        event: &PointerEvent,
        tree: &NodeTree,
        now_ms: u64,
        events: &mut EventDispatcher,
    ) -> bool {
        if !self.detector.check(event, tree) {
            return false;
        }
        tracing::debug!("pointer-down outside field, closing");
        self.close(now_ms, events);
        true
    }

    /// Unmount: cancel the pending transition and detach listeners
    pub fn teardown(&mut self, events: &mut EventDispatcher) {
        self.popover.cancel();
        self.detector.teardown(events);
        self.reset_view();
    }

    pub fn is_listening(&self) -> bool {
        self.detector.is_active()
    }

    // -------------------------------------------------------------------------
    // View state
    // -------------------------------------------------------------------------

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Replace the query; the focused index no longer points into the new view
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.focused_index = None;
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focused_index
    }

    pub fn set_focused_index(&mut self, index: Option<usize>) {
        self.focused_index = index;
    }

    fn reset_view(&mut self) {
        self.search_query.clear();
        self.focused_index = None;
    }

    pub fn has_focus(&self) -> bool {
        self.input_focused
    }

    pub fn focus(&mut self) {
        self.input_focused = true;
    }

    pub fn blur(&mut self) {
        self.input_focused = false;
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for Field<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("binding", &self.binding)
            .field("popover", &self.popover.state())
            .field("search_query", &self.search_query)
            .field("focused_index", &self.focused_index)
            .field("input_focused", &self.input_focused)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Harness {
        tree: NodeTree,
        events: EventDispatcher,
        outside: NodeId,
        field: Field<u32>,
        changes: Arc<Mutex<Vec<Option<u32>>>>,
    }

    fn harness() -> Harness {
        let mut tree = NodeTree::new();
        let root = tree.create_root();
        let bounds = tree.create_child(root).unwrap();
        let outside = tree.create_child(root).unwrap();
        let mut field = Field::new(&ThemeContext::default(), bounds, "test-field");
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = changes.clone();
        field.callbacks_mut().on_change = Some(Arc::new(move |v| sink.lock().unwrap().push(v)));
        Harness {
            tree,
            events: EventDispatcher::new(),
            outside,
            field,
            changes,
        }
    }

    #[test]
    fn test_commit_runs_full_protocol() {
        let mut h = harness();
        h.field.focus();
        h.field.open(0, &mut h.events);
        h.field.set_search_query("b");
        h.field.set_focused_index(Some(0));

        assert!(h.field.commit(Some(2), false, 10, &mut h.events));
        assert_eq!(h.field.value(), Some(&2));
        assert_eq!(*h.changes.lock().unwrap(), vec![Some(2)]);
        assert!(!h.field.is_open());
        assert!(h.field.is_mounted());
        assert_eq!(h.field.search_query(), "");
        assert_eq!(h.field.focused_index(), None);
        assert!(!h.field.has_focus());
        assert!(!h.field.is_listening());
    }

    #[test]
    fn test_disabled_commit_is_noop() {
        let mut h = harness();
        h.field.open(0, &mut h.events);
        h.field.set_search_query("x");
        h.field.set_focused_index(Some(1));

        assert!(!h.field.commit(Some(5), true, 10, &mut h.events));
        assert_eq!(h.field.value(), None);
        assert!(h.changes.lock().unwrap().is_empty());
        assert!(h.field.is_open());
        assert_eq!(h.field.search_query(), "x");
        assert_eq!(h.field.focused_index(), Some(1));
    }

    #[test]
    fn test_controlled_commit_only_notifies() {
        let mut h = harness();
        h.field.binding_mut().set_external(Some(1));
        assert!(h.field.commit(Some(9), false, 0, &mut h.events));
        assert_eq!(h.field.value(), Some(&1));
        assert_eq!(*h.changes.lock().unwrap(), vec![Some(9)]);

        // owner stops controlling; the internal value was never written
        h.field.binding_mut().set_external(None);
        assert_eq!(h.field.value(), None);
    }

    #[test]
    fn test_clear_commits_none() {
        let mut h = harness();
        h.field.commit(Some(3), false, 0, &mut h.events);
        assert!(h.field.clear(5, &mut h.events));
        assert_eq!(h.field.value(), None);
        assert_eq!(*h.changes.lock().unwrap(), vec![Some(3), None]);
    }

    #[test]
    fn test_outside_pointer_down_closes_and_clears_search() {
        let mut h = harness();
        h.field.open(0, &mut h.events);
        h.field.set_search_query("abc");
        assert_eq!(h.events.listener_count(), 1);

        let event = PointerEvent::new(h.outside);
        assert!(h.field.handle_pointer_down(&event, &h.tree, 20, &mut h.events));
        assert!(!h.field.is_open());
        assert_eq!(h.field.search_query(), "");
        assert_eq!(h.events.listener_count(), 0);

        // closed fields ignore further pointer-downs
        assert!(!h.field.handle_pointer_down(&event, &h.tree, 30, &mut h.events));
    }

    #[test]
    fn test_open_close_callbacks_and_teardown() {
        let mut h = harness();
        let log = Arc::new(Mutex::new(Vec::new()));
        let (opened, closed) = (log.clone(), log.clone());
        h.field.callbacks_mut().on_open = Some(Arc::new(move || opened.lock().unwrap().push("open")));
        h.field.callbacks_mut().on_close = Some(Arc::new(move || closed.lock().unwrap().push("close")));

        h.field.open(0, &mut h.events);
        h.field.open(1, &mut h.events);
        h.field.toggle(2, &mut h.events);
        h.field.open(3, &mut h.events);
        assert_eq!(*log.lock().unwrap(), vec!["open", "close", "open"]);

        h.field.teardown(&mut h.events);
        assert!(!h.field.is_mounted());
        assert_eq!(h.events.listener_count(), 0);
    }
}
