//! # better component library (better_cn)
//!
//! Headless, themeable widgets: dropdowns, date/time fields, calendar, tabs,
//! tooltip, modal and alerts. Widgets own their state and consume input
//! events; hosts render from the state they expose.
//!
//! ## Layers
//!
//! - **Core**: value formatting ([`datetime`]), the open/close lifecycle
//!   ([`popover`]), outside-click detection ([`outside_click`]), keyboard
//!   list navigation ([`list_nav`]) and the commit protocol ([`field`])
//! - **Components**: widgets composed from the core, in [`components`]
//!
//! Configuration comes from an explicitly passed
//! [`ThemeContext`](better_theme::ThemeContext); nothing is global.
//!
//! ## Example
//!
//! ```rust
//! use better_cn::prelude::*;
//! use better_core::{EventDispatcher, NodeTree, PointerEvent};
//!
//! let ctx = ThemeContext::default();
//! let mut tree = NodeTree::new();
//! let root = tree.create_root();
//! let field_node = tree.create_child(root).unwrap();
//! let mut events = EventDispatcher::new();
//!
//! let mut birthday = cn::date(&ctx, field_node).default_value("1990-06-15");
//! birthday.open(0, &mut events);
//! assert_eq!(birthday.calendar().title(), "June 1990");
//!
//! // Clicking elsewhere closes the picker
//! birthday.handle_pointer_down(&PointerEvent::new(root), &tree, 50, &mut events);
//! assert!(!birthday.is_open());
//! ```

pub mod components;
pub mod datetime;
pub mod field;
pub mod list_nav;
pub mod outside_click;
pub mod popover;

pub use components::*;

/// Convenience module for constructing widgets with a `cn::` prefix
pub mod cn {
    pub use crate::components::alert::alert;
    pub use crate::components::dropdown::{dropdown, searchable};
    pub use crate::components::input_field::{date, date_time, text, time};
    pub use crate::components::link::link;
    pub use crate::components::modal::modal;
    pub use crate::components::phone::phone;
    pub use crate::components::tabs::{tab_item, tabs};
    pub use crate::components::tooltip::tooltip;
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::cn;
    pub use crate::components::{
        Alert, AlertStack, AlertVariant, Calendar, DateBounds, Dropdown, DropdownOption, FieldKind,
        InputField, Link, Modal, PhoneField, PickerColumn, Tabs, Tooltip, TooltipSide,
    };
    pub use crate::datetime::{CalendarDate, ClockTime, DateTime};
    pub use crate::list_nav::NavOutcome;
    pub use crate::popover::{Popover, PopoverState};
    // Re-export commonly needed theme types
    pub use better_theme::{ColorToken, RadiusToken, SpacingToken, ThemeContext};
}
