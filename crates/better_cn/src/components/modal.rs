//! Modal - a dismissible layer over a backdrop
//!
//! Uses the shared popover lifecycle so the exit animation has time to play,
//! and the outside-click detector bounded by the content node to recognize
//! backdrop clicks. While open with Escape dismissal enabled, the modal holds
//! a document key-down listener so Escape reaches it wherever focus is.

use std::sync::Arc;

use better_core::{
    EventDispatcher, InstanceKey, KeyCode, KeyEvent, ListenerId, ListenerKind, NodeId, NodeTree,
    PointerEvent,
};
use better_theme::ThemeContext;

use crate::field::Handler;
use crate::outside_click::OutsideClick;
use crate::popover::Popover;

pub struct Modal {
    key: InstanceKey,
    title: String,
    popover: Popover,
    detector: OutsideClick,
    escape_listener: Option<ListenerId>,
    close_on_escape: bool,
    close_on_backdrop: bool,
    on_open: Option<Handler>,
    on_close: Option<Handler>,
}

impl Modal {
    /// Modal whose dialog content is the `content` node
    #[track_caller]
    pub fn new(ctx: &ThemeContext, content: NodeId) -> Self {
        let key = InstanceKey::new("modal");
        let detector = OutsideClick::new(content, key.get());
        Self {
            key,
            title: String::new(),
            popover: Popover::from_context(ctx),
            detector,
            escape_listener: None,
            close_on_escape: true,
            close_on_backdrop: true,
            on_open: None,
            on_close: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn close_on_escape(mut self, enabled: bool) -> Self {
        self.close_on_escape = enabled;
        self
    }

    pub fn close_on_backdrop(mut self, enabled: bool) -> Self {
        self.close_on_backdrop = enabled;
        self
    }

    pub fn on_open<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_open = Some(Arc::new(callback));
        self
    }

    pub fn on_close<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_close = Some(Arc::new(callback));
        self
    }

    pub fn key(&self) -> &str {
        self.key.get()
    }

    pub fn title_text(&self) -> &str {
        &self.title
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
        self.detector.sync(self.close_on_backdrop, events);
        if self.close_on_escape && self.escape_listener.is_none() {
            self.escape_listener = Some(events.add_listener(ListenerKind::KeyDown, self.key.get()));
        }
        if let Some(on_open) = &self.on_open {
            on_open();
        }
        true
    }

    fn detach(&mut self, events: &mut EventDispatcher) {
        self.detector.sync(false, events);
        if let Some(id) = self.escape_listener.take() {
            events.remove_listener(id);
        }
    }

    pub fn close(&mut self, now_ms: u64, events: &mut EventDispatcher) -> bool {
        self.detach(events);
        if !self.popover.close(now_ms) {
            return false;
        }
        if let Some(on_close) = &self.on_close {
            on_close();
        }
        true
    }

    /// Document key-down; Escape dismisses while the listener is attached
    pub fn handle_key(&mut self, event: &mut KeyEvent, now_ms: u64, events: &mut EventDispatcher) -> bool {
        if event.key != KeyCode::Escape || self.escape_listener.is_none() {
            return false;
        }
        event.prevent_default();
        self.close(now_ms, events)
    }

    /// A pointer-down outside the content is a backdrop click
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
        tracing::debug!("backdrop click, closing modal");
        self.close(now_ms, events)
    }

    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.popover.tick(now_ms)
    }

    pub fn teardown(&mut self, events: &mut EventDispatcher) {
        self.popover.cancel();
        self.detach(events);
    }
}

impl std::fmt::Debug for Modal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modal")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("state", &self.popover.state())
            .field("close_on_escape", &self.close_on_escape)
            .field("close_on_backdrop", &self.close_on_backdrop)
            .finish_non_exhaustive()
    }
}

#[track_caller]
pub fn modal(ctx: &ThemeContext, content: NodeId) -> Modal {
    Modal::new(ctx, content)
}
