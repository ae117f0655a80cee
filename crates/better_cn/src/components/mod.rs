//! Stateful widgets built on the interaction core
//!
//! Each widget follows the same pattern:
//! - Constructor function (e.g. `dropdown(&ctx, bounds)`), with variant
//!   constructors where a widget has variants (`searchable`, `date_time`)
//! - Builder methods consuming `self` for configuration and callbacks
//! - `handle_key` / `handle_pointer_down` / `tick` driven by the host, with
//!   the current time passed in milliseconds
//! - `teardown` releasing listeners and timers

pub mod alert;
pub mod calendar;
pub mod dropdown;
pub mod input_field;
pub mod link;
pub mod modal;
pub mod phone;
pub mod tabs;
pub mod tooltip;

pub use alert::{alert, Alert, AlertId, AlertStack, AlertVariant};
pub use calendar::{Calendar, CalendarCell, CalendarGrid, DateBounds};
pub use dropdown::{dropdown, searchable, Dropdown, DropdownKind, DropdownOption};
pub use input_field::{FieldKind, InputField, PickerColumn};
pub use link::{link, Link};
pub use modal::{modal, Modal};
pub use phone::{phone, split_phone, PhoneField, PhoneParts};
pub use tabs::{tab_item, tabs, TabGroupStore, TabItem, Tabs};
pub use tooltip::{tooltip, Rect, Tooltip, TooltipAlign, TooltipPosition, TooltipSide};
