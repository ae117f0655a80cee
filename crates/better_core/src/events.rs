//! Input events and the document listener registry
//!
//! The host translates native input into [`KeyEvent`] and [`PointerEvent`]
//! values and routes pointer-down events in two phases:
//!
//! 1. **Capture**: every document listener registered with
//!    [`ListenerKind::PointerDown`], in registration order
//! 2. **Target**: the click handler of the widget under the pointer
//!
//! Dismissal logic (outside clicks) therefore always runs before a late click
//! on an element outside the widget is handled.
//!
//! Listener bookkeeping lives in [`EventDispatcher`]. Widgets register only
//! while they need document events and must remove their listener when they
//! deactivate or are torn down; [`EventDispatcher::listener_count`] exposes
//! leaks.

use bitflags::bitflags;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::tree::NodeId;

new_key_type! {
    /// Handle for a registered document listener
    pub struct ListenerId;
}

// =============================================================================
// KEYBOARD
// =============================================================================

/// Logical key identifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Escape,
    Space,
    Tab,
    Backspace,
    Home,
    End,
    /// Any printable character other than space
    Char(char),
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.key` name to a key code
    ///
    /// Returns `None` for keys widgets never react to (modifiers, function keys).
    pub fn from_key_name(name: &str) -> Option<Self> {
        let code = match name {
            "ArrowUp" => KeyCode::ArrowUp,
            "ArrowDown" => KeyCode::ArrowDown,
            "ArrowLeft" => KeyCode::ArrowLeft,
            "ArrowRight" => KeyCode::ArrowRight,
            "Enter" => KeyCode::Enter,
            "Escape" | "Esc" => KeyCode::Escape,
            " " | "Spacebar" => KeyCode::Space,
            "Tab" => KeyCode::Tab,
            "Backspace" => KeyCode::Backspace,
            "Home" => KeyCode::Home,
            "End" => KeyCode::End,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(code)
    }
}

bitflags! {
    /// Modifier keys held during a key event
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        const META = 1 << 3;
    }
}

/// A key-down event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub modifiers: Modifiers,
    default_prevented: bool,
}

impl KeyEvent {
    pub fn new(key: KeyCode) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
            default_prevented: false,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Suppress the platform default action (scrolling, form submission)
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

// =============================================================================
// POINTER
// =============================================================================

/// A pointer-down event targeted at a node
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Deepest node under the pointer
    pub target: NodeId,
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn at(target: NodeId, x: f32, y: f32) -> Self {
        Self { target, x, y }
    }
}

// =============================================================================
// DOCUMENT LISTENERS
// =============================================================================

/// Document-level event a listener subscribes to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerDown,
    KeyDown,
}

#[derive(Debug)]
struct ListenerEntry {
    kind: ListenerKind,
    /// Instance key of the registering widget, for diagnostics
    owner: String,
}

/// Registry of document-level listeners
///
/// The dispatcher does not own callbacks. It tracks which widgets are
/// subscribed so the host knows whom to route capture-phase events to, in
/// registration order.
#[derive(Debug, Default)]
pub struct EventDispatcher {
    listeners: SlotMap<ListenerId, ListenerEntry>,
    order: Vec<ListenerId>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document listener for `owner`
    pub fn add_listener(&mut self, kind: ListenerKind, owner: impl Into<String>) -> ListenerId {
        let owner = owner.into();
        tracing::trace!(?kind, %owner, "document listener added");
        let id = self.listeners.insert(ListenerEntry { kind, owner });
        self.order.push(id);
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        match self.listeners.remove(id) {
            Some(entry) => {
                tracing::trace!(kind = ?entry.kind, owner = %entry.owner, "document listener removed");
                self.order.retain(|l| *l != id);
                true
            }
            None => false,
        }
    }

    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(id)
    }

    /// Listeners of a kind in capture order
    pub fn listeners(&self, kind: ListenerKind) -> SmallVec<[ListenerId; 4]> {
        self.order
            .iter()
            .copied()
            .filter(|id| self.listeners.get(*id).is_some_and(|l| l.kind == kind))
            .collect()
    }

    /// Owner key of a registered listener
    pub fn owner(&self, id: ListenerId) -> Option<&str> {
        self.listeners.get(id).map(|l| l.owner.as_str())
    }

    /// Total number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
