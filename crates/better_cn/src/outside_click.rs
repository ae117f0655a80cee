//! Outside-interaction detection
//!
//! While active, the detector owns one pointer-down listener on the document
//! [`EventDispatcher`]. Hosts deliver pointer-down events to widgets in capture
//! order, before any click handler, so a close requested here always wins over
//! a late click on an option outside the field.

use better_core::{EventDispatcher, ListenerId, ListenerKind, NodeId, NodeTree, PointerEvent};

#[derive(Debug)]
pub struct OutsideClick {
    bounds: NodeId,
    owner: String,
    listener: Option<ListenerId>,
}

impl OutsideClick {
    /// Detector for pointer-downs outside `bounds`; `owner` labels the listener
    pub fn new(bounds: NodeId, owner: impl Into<String>) -> Self {
        Self {
            bounds,
            owner: owner.into(),
            listener: None,
        }
    }

    pub fn bounds(&self) -> NodeId {
        self.bounds
    }

    pub fn is_active(&self) -> bool {
        self.listener.is_some()
    }

    /// Attach the document listener while `active`, detach otherwise
    pub fn sync(&mut self, active: bool, events: &mut EventDispatcher) {
        match (active, self.listener) {
            (true, None) => {
                let id = events.add_listener(ListenerKind::PointerDown, self.owner.clone());
                tracing::trace!(owner = %self.owner, "outside-click listener attached");
                self.listener = Some(id);
            }
            (false, Some(id)) => {
                events.remove_listener(id);
                tracing::trace!(owner = %self.owner, "outside-click listener detached");
                self.listener = None;
            }
            _ => {}
        }
    }

    /// Whether `event` lands outside the bounds while the listener is attached
    pub fn check(&self, event: &PointerEvent, tree: &NodeTree) -> bool {
        self.is_active() && !tree.contains(self.bounds, event.target)
    }

    pub fn teardown(&mut self, events: &mut EventDispatcher) {
        self.sync(false, events);
    }
}
