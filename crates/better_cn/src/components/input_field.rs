//! Input field - text, date, time and date-time variants
//!
//! All variants expose the same text-input-shaped [`InputSurface`]. The
//! picker variants (`date`, `time`, `date_time`) are read-only surfaces that
//! open a popover (month grid and/or hour and minute lists); every pick goes
//! through the field commit protocol and produces the canonical string
//! (`YYYY-MM-DD`, `HH:MM` or `YYYY-MM-DDTHH:MM`).
//!
//! While a picker is open, Up/Down move through the active [`PickerColumn`]
//! (days of the shown month, hours or minutes), Left/Right switch columns and
//! Enter commits the focused entry.
//!
//! The text variant propagates edits directly, or through a [`Debouncer`]
//! when [`debounced`](InputField::debounced) is set. Blur flushes any pending
//! value. A controlled text field always shows the owner's value; edits only
//! reach the owner through `on_change`.
//!
//! # Example
//!
//! ```rust
//! use better_cn::prelude::*;
//! use better_core::{EventDispatcher, NodeTree};
//!
//! let ctx = ThemeContext::default();
//! let mut tree = NodeTree::new();
//! let bounds = tree.create_root();
//! let mut events = EventDispatcher::new();
//!
//! let mut when = cn::date_time(&ctx, bounds).default_value("2024-01-15T10:30");
//! when.open(0, &mut events);
//! when.pick_hour(14, 10, &mut events);
//! assert_eq!(when.value(), Some("2024-01-15T14:30"));
//! ```

use std::sync::Arc;

use better_core::{
    Debouncer, EventDispatcher, InstanceKey, KeyCode, KeyEvent, Modifiers, NodeId, NodeTree, PointerEvent,
};
use better_theme::{IconData, ThemeContext};
use smallvec::SmallVec;

use crate::components::calendar::{Calendar, CalendarGrid, DateBounds};
use crate::datetime::{
    format_date, format_date_time, format_time, parse_date, parse_date_time, parse_time, CalendarDate,
    ClockTime, DateTime,
};
use crate::field::{Field, InputSurface};
use crate::list_nav::{ListNavigator, NavOutcome};

/// View shown when a picker has no value and no host-supplied date
const FALLBACK_VIEW: (i32, u32) = (2000, 0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    Time,
    DateTime,
}

impl FieldKind {
    pub fn has_date(&self) -> bool {
        matches!(self, FieldKind::Date | FieldKind::DateTime)
    }

    pub fn has_time(&self) -> bool {
        matches!(self, FieldKind::Time | FieldKind::DateTime)
    }

    pub fn is_picker(&self) -> bool {
        *self != FieldKind::Text
    }

    /// Whether `value` is a complete canonical value for this kind
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            FieldKind::Text => true,
            FieldKind::Date => parse_date(value).is_some(),
            FieldKind::Time => parse_time(value).is_some(),
            FieldKind::DateTime => parse_date_time(value).is_some(),
        }
    }

    fn icon_name(&self) -> Option<&'static str> {
        match self {
            FieldKind::Text => None,
            FieldKind::Date | FieldKind::DateTime => Some("calendar"),
            FieldKind::Time => Some("clock"),
        }
    }

    /// Picker columns in left-to-right order
    pub fn columns(&self) -> &'static [PickerColumn] {
        match self {
            FieldKind::Text => &[],
            FieldKind::Date => &[PickerColumn::Day],
            FieldKind::Time => &[PickerColumn::Hour, PickerColumn::Minute],
            FieldKind::DateTime => &[PickerColumn::Day, PickerColumn::Hour, PickerColumn::Minute],
        }
    }
}

/// List inside a picker popover that the arrow keys move through
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerColumn {
    /// Days of the shown month, index 0 is day 1
    Day,
    Hour,
    Minute,
}

pub struct InputField {
    key: InstanceKey,
    kind: FieldKind,
    field: Field<String>,
    calendar: Calendar,
    navigator: ListNavigator,
    column: Option<PickerColumn>,
    /// Live text of a text field (may run ahead of the committed value)
    text: String,
    debouncer: Option<Debouncer<String>>,
    default_debounce_ms: u64,
    minute_step: u32,
    placeholder: String,
    disabled: bool,
}

impl InputField {
    #[track_caller]
    fn with_kind(ctx: &ThemeContext, bounds: NodeId, kind: FieldKind) -> Self {
        let key = InstanceKey::new("input-field");
        let field = Field::new(ctx, bounds, key.get());
        Self {
            key,
            kind,
            field,
            calendar: Calendar::new(FALLBACK_VIEW.0, FALLBACK_VIEW.1),
            navigator: ListNavigator::new().space_commits(true),
            column: kind.columns().first().copied(),
            text: String::new(),
            debouncer: None,
            default_debounce_ms: ctx.debounce_ms(),
            minute_step: 1,
            placeholder: String::new(),
            disabled: false,
        }
    }

    // -------------------------------------------------------------------------
    // Builder
    // -------------------------------------------------------------------------

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Initial value of an uncontrolled field. Picker values that do not parse
    /// are dropped.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        if let Some(value) = self.validate(value) {
            self.text = value.clone();
            self.field.binding_mut().write(Some(value));
        }
        self.sync_calendar();
        self
    }

    /// Owner-controlled value; update it with [`set_value`](Self::set_value)
    pub fn value_controlled(mut self, value: impl Into<String>) -> Self {
        self.set_value(Some(value.into()));
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn bounds(mut self, bounds: DateBounds) -> Self {
        self.calendar = self.calendar.bounds(bounds);
        self
    }

    /// Host-supplied current date; the initial month view and the date used
    /// when a time is picked before any date
    pub fn today(mut self, today: CalendarDate) -> Self {
        self.calendar = self.calendar.today(today);
        self.sync_calendar();
        self
    }

    /// Spacing of the minute list
    pub fn minute_step(mut self, step: u32) -> Self {
        self.minute_step = step.clamp(1, 30);
        self
    }

    /// Debounce text propagation by the configured delay (theme default 500ms)
    pub fn debounced(mut self) -> Self {
        self.debouncer = Some(Debouncer::new(self.default_debounce_ms));
        self
    }

    pub fn debounce_ms(mut self, delay_ms: u64) -> Self {
        self.debouncer = Some(Debouncer::new(delay_ms));
        self
    }

    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(Option<String>) + Send + Sync + 'static,
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

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn value(&self) -> Option<&str> {
        self.field.value().map(String::as_str)
    }

    /// Owner update of a controlled field (`None` hands control back)
    pub fn set_value(&mut self, value: Option<String>) {
        let value = value.and_then(|v| self.validate(v));
        if let Some(value) = &value {
            self.text = value.clone();
        }
        self.field.binding_mut().set_external(value);
        if !self.field.binding().is_controlled() {
            self.text = self.value().unwrap_or_default().to_string();
        }
        self.sync_calendar();
    }

    pub fn date_value(&self) -> Option<CalendarDate> {
        let value = self.value()?;
        match self.kind {
            FieldKind::Date => parse_date(value),
            FieldKind::DateTime => parse_date_time(value).map(|v| v.date),
            _ => None,
        }
    }

    pub fn time_value(&self) -> Option<ClockTime> {
        let value = self.value()?;
        match self.kind {
            FieldKind::Time => parse_time(value),
            FieldKind::DateTime => parse_date_time(value).map(|v| v.time),
            _ => None,
        }
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Month grid with the selected day marked
    pub fn grid(&self) -> CalendarGrid {
        self.calendar.grid(self.date_value())
    }

    pub fn hour_options(&self) -> Vec<u32> {
        (0..24).collect()
    }

    pub fn minute_options(&self) -> Vec<u32> {
        (0..60).step_by(self.minute_step as usize).collect()
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

    /// Name of the trailing icon
    pub fn icon_name(&self) -> Option<&'static str> {
        self.kind.icon_name()
    }

    /// Trailing icon from the context's registry
    pub fn icon<'a>(&self, ctx: &'a ThemeContext) -> Option<&'a IconData> {
        self.icon_name().map(|name| ctx.icon(name))
    }

    /// Column the arrow keys move through
    pub fn column(&self) -> Option<PickerColumn> {
        self.column
    }

    /// Switch the active column. Columns the kind lacks are ignored.
    pub fn set_column(&mut self, column: PickerColumn) -> bool {
        if !self.kind.columns().contains(&column) {
            return false;
        }
        if self.column != Some(column) {
            self.column = Some(column);
            self.field.set_focused_index(None);
        }
        true
    }

    /// Focused entry of the active column
    pub fn focused_index(&self) -> Option<usize> {
        self.field.focused_index()
    }

    pub fn surface(&self) -> InputSurface {
        let value = match self.kind {
            FieldKind::Text if !self.field.binding().is_controlled() => self.text.clone(),
            _ => self.value().unwrap_or_default().to_string(),
        };
        InputSurface {
            value,
            placeholder: self.placeholder.clone(),
            read_only: self.kind.is_picker(),
            disabled: self.disabled,
            focused: self.has_focus(),
        }
    }

    fn validate(&self, value: String) -> Option<String> {
        if self.kind.accepts(&value) {
            Some(value)
        } else {
            tracing::debug!(kind = ?self.kind, %value, "ignoring value that does not parse");
            None
        }
    }

    /// Point the month view at the selected date, else at today
    fn sync_calendar(&mut self) {
        if let Some(date) = self.date_value().or(self.calendar.current_date()) {
            self.calendar.show(date);
        }
    }

    // -------------------------------------------------------------------------
    // Text variant
    // -------------------------------------------------------------------------

    /// Text edit. Propagates now, or once the debounce delay has passed.
    pub fn input(&mut self, text: impl Into<String>, now_ms: u64) {
        if self.kind.is_picker() || self.disabled {
            return;
        }
        let text = text.into();
        if !self.field.binding().is_controlled() {
            self.text = text.clone();
        }
        match self.debouncer.as_mut() {
            Some(debouncer) => debouncer.push(text, now_ms),
            None => self.propagate(text),
        }
    }

    fn propagate(&mut self, text: String) {
        let value = (!text.is_empty()).then_some(text);
        self.field.binding_mut().write(value.clone());
        if let Some(on_change) = &self.field.callbacks().on_change {
            on_change(value);
        }
    }

    /// Deadline of a pending debounced edit
    pub fn next_deadline(&self) -> Option<u64> {
        let debounce = self.debouncer.as_ref().and_then(Debouncer::deadline);
        let unmount = self.field.popover().next_deadline();
        match (debounce, unmount) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // -------------------------------------------------------------------------
    // Picker variants
    // -------------------------------------------------------------------------

    pub fn focus(&mut self, now_ms: u64, events: &mut EventDispatcher) {
        if self.disabled {
            return;
        }
        self.field.focus();
        if self.kind.is_picker() {
            self.open(now_ms, events);
        }
    }

    /// Blur flushes a pending debounced edit
    pub fn blur(&mut self) {
        self.field.blur();
        if let Some(text) = self.debouncer.as_mut().and_then(Debouncer::flush) {
            self.propagate(text);
        }
    }

    pub fn open(&mut self, now_ms: u64, events: &mut EventDispatcher) -> bool {
        if !self.kind.is_picker() || self.disabled {
            return false;
        }
        self.sync_calendar();
        if !self.field.open(now_ms, events) {
            return false;
        }
        self.column = self.kind.columns().first().copied();
        true
    }

    pub fn close(&mut self, now_ms: u64, events: &mut EventDispatcher) -> bool {
        self.field.close(now_ms, events)
    }

    pub fn toggle(&mut self, now_ms: u64, events: &mut EventDispatcher) -> bool {
        if self.is_open() {
            self.close(now_ms, events)
        } else {
            self.open(now_ms, events)
        }
    }

    pub fn previous_month(&mut self) {
        self.calendar.previous_month();
        self.reset_day_focus();
    }

    pub fn next_month(&mut self) {
        self.calendar.next_month();
        self.reset_day_focus();
    }

    fn reset_day_focus(&mut self) {
        if self.column == Some(PickerColumn::Day) {
            self.field.set_focused_index(None);
        }
    }

    /// Date a time pick is combined with when the field has no date yet
    fn base_date(&self) -> Option<CalendarDate> {
        self.date_value()
            .or(self.calendar.current_date())
            .or_else(|| self.calendar.date(1))
    }

    /// Pick `day` of the shown month
    pub fn pick_day(&mut self, day: u32, now_ms: u64, events: &mut EventDispatcher) -> bool {
        if !self.kind.has_date() {
            return false;
        }
        let Some(date) = self.calendar.date(day) else {
            return false;
        };
        let disabled = !self.calendar.date_bounds().allows(date);
        let value = match self.kind {
            FieldKind::DateTime => {
                let time = self.time_value().unwrap_or_default();
                format_date_time(DateTime::new(date, time))
            }
            _ => format_date(date),
        };
        self.field.commit(Some(value), disabled, now_ms, events)
    }

    pub fn pick_hour(&mut self, hour: u32, now_ms: u64, events: &mut EventDispatcher) -> bool {
        let minute = self.time_value().map_or(0, |t| t.minute());
        self.pick_time(ClockTime::new(hour, minute), now_ms, events)
    }

    pub fn pick_minute(&mut self, minute: u32, now_ms: u64, events: &mut EventDispatcher) -> bool {
        let hour = self.time_value().map_or(0, |t| t.hour());
        self.pick_time(ClockTime::new(hour, minute), now_ms, events)
    }

    fn pick_time(&mut self, time: Option<ClockTime>, now_ms: u64, events: &mut EventDispatcher) -> bool {
        let Some(time) = time else {
            return false;
        };
        let value = match self.kind {
            FieldKind::Time => format_time(time),
            FieldKind::DateTime => {
                let Some(date) = self.base_date() else {
                    return false;
                };
                format_date_time(DateTime::new(date, time))
            }
            _ => return false,
        };
        self.field.commit(Some(value), false, now_ms, events)
    }

    pub fn clear(&mut self, now_ms: u64, events: &mut EventDispatcher) -> bool {
        if self.disabled {
            return false;
        }
        if !self.field.binding().is_controlled() {
            self.text.clear();
        }
        if let Some(debouncer) = &mut self.debouncer {
            debouncer.cancel();
        }
        self.field.clear(now_ms, events)
    }

    /// Key-down on the input; text fields ignore keys
    ///
    /// Closed pickers open with arrows or Enter. Open pickers move focus
    /// through the active column and commit with Enter or Space; Left/Right
    /// switch columns (reported as `Ignored`, read [`column`](Self::column)).
    pub fn handle_key(&mut self, event: &mut KeyEvent, now_ms: u64, events: &mut EventDispatcher) -> NavOutcome {
        if !self.kind.is_picker() || self.disabled {
            return NavOutcome::Ignored;
        }
        let chord = event
            .modifiers
            .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META);
        if self.is_open() && !chord {
            let forward = match event.key {
                KeyCode::ArrowRight => Some(true),
                KeyCode::ArrowLeft => Some(false),
                _ => None,
            };
            if let Some(forward) = forward {
                if self.step_column(forward) {
                    event.prevent_default();
                }
                return NavOutcome::Ignored;
            }
        }

        let enabled = self.column_entries();
        let outcome = self.navigator.handle(
            event,
            self.is_open(),
            self.field.focused_index(),
            enabled.len(),
            |i| enabled[i],
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
                self.commit_entry(index, now_ms, events);
            }
            NavOutcome::Ignored => {}
        }
        outcome
    }

    /// Selectable flag per entry of the active column
    fn column_entries(&self) -> SmallVec<[bool; 64]> {
        match self.column {
            Some(PickerColumn::Day) => self.grid().cells.iter().map(|c| !c.disabled).collect(),
            Some(PickerColumn::Hour) => self.hour_options().iter().map(|_| true).collect(),
            Some(PickerColumn::Minute) => self.minute_options().iter().map(|_| true).collect(),
            None => SmallVec::new(),
        }
    }

    fn step_column(&mut self, forward: bool) -> bool {
        let columns = self.kind.columns();
        let Some(current) = self.column.and_then(|c| columns.iter().position(|&k| k == c)) else {
            return false;
        };
        let next = if forward {
            current + 1
        } else {
            match current.checked_sub(1) {
                Some(prev) => prev,
                None => return false,
            }
        };
        match columns.get(next) {
            Some(&column) => self.set_column(column),
            None => false,
        }
    }

    fn commit_entry(&mut self, index: usize, now_ms: u64, events: &mut EventDispatcher) -> bool {
        match self.column {
            Some(PickerColumn::Day) => {
                let Some(day) = u32::try_from(index + 1).ok() else {
                    return false;
                };
                self.pick_day(day, now_ms, events)
            }
            Some(PickerColumn::Hour) => match self.hour_options().get(index) {
                Some(&hour) => self.pick_hour(hour, now_ms, events),
                None => false,
            },
            Some(PickerColumn::Minute) => match self.minute_options().get(index) {
                Some(&minute) => self.pick_minute(minute, now_ms, events),
                None => false,
            },
            None => false,
        }
    }

    pub fn handle_pointer_down(
        &mut self,
        event: &PointerEvent,
        tree: &NodeTree,
        now_ms: u64,
        events: &mut EventDispatcher,
    ) -> bool {
        self.field.handle_pointer_down(event, tree, now_ms, events)
    }

    /// Advance timers: debounced text propagation and popover unmount
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let mut changed = self.field.tick(now_ms);
        if let Some(text) = self.debouncer.as_mut().and_then(|d| d.poll(now_ms)) {
            self.propagate(text);
            changed = true;
        }
        changed
    }

    pub fn teardown(&mut self, events: &mut EventDispatcher) {
        if let Some(debouncer) = &mut self.debouncer {
            debouncer.cancel();
        }
        self.field.teardown(events);
    }
}

impl std::fmt::Debug for InputField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputField")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("field", &self.field)
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

#[track_caller]
pub fn text(ctx: &ThemeContext, bounds: NodeId) -> InputField {
    InputField::with_kind(ctx, bounds, FieldKind::Text)
}

#[track_caller]
pub fn date(ctx: &ThemeContext, bounds: NodeId) -> InputField {
    InputField::with_kind(ctx, bounds, FieldKind::Date)
}

#[track_caller]
pub fn time(ctx: &ThemeContext, bounds: NodeId) -> InputField {
    InputField::with_kind(ctx, bounds, FieldKind::Time)
}

#[track_caller]
pub fn date_time(ctx: &ThemeContext, bounds: NodeId) -> InputField {
    InputField::with_kind(ctx, bounds, FieldKind::DateTime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn setup() -> (ThemeContext, NodeId, EventDispatcher) {
        let mut tree = NodeTree::new();
        let bounds = tree.create_root();
        (ThemeContext::default(), bounds, EventDispatcher::new())
    }

    fn recorder() -> (Arc<Mutex<Vec<Option<String>>>>, impl Fn(Option<String>) + Send + Sync + 'static) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        (log, move |v| sink.lock().unwrap().push(v))
    }

    #[test]
    fn test_pick_hour_keeps_date_and_minute() {
        let (ctx, bounds, mut events) = setup();
        let (log, on_change) = recorder();
        let mut field = date_time(&ctx, bounds)
            .default_value("2024-01-15T10:30")
            .on_change(on_change);

        field.open(0, &mut events);
        assert_eq!((field.calendar().year(), field.calendar().month()), (2024, 0));
        assert!(field.pick_hour(14, 10, &mut events));
        assert_eq!(field.value(), Some("2024-01-15T14:30"));
        assert_eq!(*log.lock().unwrap(), vec![Some("2024-01-15T14:30".to_string())]);
        assert!(!field.is_open());

        assert!(field.pick_minute(5, 20, &mut events));
        assert_eq!(field.value(), Some("2024-01-15T14:05"));
        assert!(!field.pick_hour(24, 30, &mut events));
        assert_eq!(field.value(), Some("2024-01-15T14:05"));
    }

    #[test]
    fn test_pick_day_keeps_time() {
        let (ctx, bounds, mut events) = setup();
        let mut field = date_time(&ctx, bounds).default_value("2024-01-15T10:30");
        field.open(0, &mut events);
        field.next_month();
        assert!(field.pick_day(29, 5, &mut events));
        assert_eq!(field.value(), Some("2024-02-29T10:30"));
        assert!(!field.pick_day(30, 6, &mut events));
    }

    #[test]
    fn test_date_field_bounds() {
        let (ctx, bounds, mut events) = setup();
        let (log, on_change) = recorder();
        let min = CalendarDate::new(2024, 1, 10).unwrap();
        let mut field = date(&ctx, bounds)
            .today(CalendarDate::new(2024, 1, 12).unwrap())
            .bounds(DateBounds::new(Some(min), None))
            .on_change(on_change);

        field.focus(0, &mut events);
        assert!(field.is_open());
        assert_eq!(field.calendar().title(), "February 2024");
        assert!(field.grid().cells[8].disabled);

        assert!(!field.pick_day(9, 5, &mut events));
        assert!(field.is_open());
        assert!(log.lock().unwrap().is_empty());

        assert!(field.pick_day(10, 6, &mut events));
        assert_eq!(field.value(), Some("2024-02-10"));
        assert!(field.grid().cells[9].selected);
        assert!(!field.has_focus());
    }

    #[test]
    fn test_time_field_options() {
        let (ctx, bounds, mut events) = setup();
        let mut field = time(&ctx, bounds).minute_step(15);
        assert_eq!(field.hour_options().len(), 24);
        assert_eq!(field.minute_options(), vec![0, 15, 30, 45]);
        assert_eq!(field.icon_name(), Some("clock"));
        assert!(field.icon(&ctx).is_some_and(|icon| !icon.is_empty()));
        assert!(text(&ctx, bounds).icon(&ctx).is_none());

        assert!(field.pick_minute(45, 0, &mut events));
        assert_eq!(field.value(), Some("00:45"));
        assert!(field.pick_hour(9, 1, &mut events));
        assert_eq!(field.value(), Some("09:45"));
        assert!(!field.pick_day(1, 2, &mut events));
    }

    #[test]
    fn test_time_without_date_uses_today() {
        let (ctx, bounds, mut events) = setup();
        let mut field = date_time(&ctx, bounds).today(CalendarDate::new(2024, 6, 4).unwrap());
        assert!(field.pick_hour(8, 0, &mut events));
        assert_eq!(field.value(), Some("2024-07-04T08:00"));
    }

    #[test]
    fn test_invalid_values_are_absent() {
        let (ctx, bounds, _) = setup();
        let field = date(&ctx, bounds).default_value("2024-02-30");
        assert_eq!(field.value(), None);
        assert_eq!(field.surface().value, "");

        let mut controlled = time(&ctx, bounds).value_controlled("12:00");
        assert_eq!(controlled.value(), Some("12:00"));
        controlled.set_value(Some("25:00".into()));
        assert_eq!(controlled.value(), None);
    }

    #[test]
    fn test_controlled_picker_does_not_write() {
        let (ctx, bounds, mut events) = setup();
        let (log, on_change) = recorder();
        let mut field = date(&ctx, bounds)
            .value_controlled("2024-03-01")
            .on_change(on_change);
        field.open(0, &mut events);
        assert!(field.pick_day(2, 1, &mut events));
        assert_eq!(field.value(), Some("2024-03-01"));
        assert_eq!(*log.lock().unwrap(), vec![Some("2024-03-02".to_string())]);

        assert!(field.clear(2, &mut events));
        assert_eq!(log.lock().unwrap().last(), Some(&None));
    }

    #[test]
    fn test_picker_keys() {
        let (ctx, bounds, mut events) = setup();
        let mut field = date(&ctx, bounds);
        let mut down = KeyEvent::new(KeyCode::ArrowDown);
        assert_eq!(field.handle_key(&mut down, 0, &mut events), NavOutcome::Open);
        assert!(down.default_prevented());
        assert!(field.is_open());
        assert_eq!(field.handle_key(&mut KeyEvent::new(KeyCode::Escape), 1, &mut events), NavOutcome::Close);
        assert!(!field.is_open());
        assert_eq!(events.listener_count(), 0);
    }

    #[test]
    fn test_time_picker_keyboard_commit() {
        let (ctx, bounds, mut events) = setup();
        let (log, on_change) = recorder();
        let mut field = time(&ctx, bounds).minute_step(15).on_change(on_change);

        assert_eq!(field.handle_key(&mut KeyEvent::new(KeyCode::Enter), 0, &mut events), NavOutcome::Open);
        assert_eq!(field.column(), Some(PickerColumn::Hour));
        for _ in 0..3 {
            field.handle_key(&mut KeyEvent::new(KeyCode::ArrowDown), 1, &mut events);
        }
        assert_eq!(field.focused_index(), Some(2));
        assert_eq!(field.handle_key(&mut KeyEvent::new(KeyCode::Enter), 2, &mut events), NavOutcome::Commit(2));
        assert_eq!(field.value(), Some("02:00"));
        assert_eq!(*log.lock().unwrap(), vec![Some("02:00".to_string())]);
        assert!(!field.is_open());

        field.open(10, &mut events);
        let mut right = KeyEvent::new(KeyCode::ArrowRight);
        field.handle_key(&mut right, 11, &mut events);
        assert!(right.default_prevented());
        assert_eq!(field.column(), Some(PickerColumn::Minute));
        field.handle_key(&mut KeyEvent::new(KeyCode::ArrowUp), 12, &mut events);
        assert_eq!(field.focused_index(), Some(3));
        field.handle_key(&mut KeyEvent::new(KeyCode::Space), 13, &mut events);
        assert_eq!(field.value(), Some("02:45"));
    }

    #[test]
    fn test_day_grid_keyboard_skips_disabled_commit() {
        let (ctx, bounds, mut events) = setup();
        let min = CalendarDate::new(2024, 1, 2).unwrap();
        let mut field = date(&ctx, bounds)
            .today(CalendarDate::new(2024, 1, 12).unwrap())
            .bounds(DateBounds::new(Some(min), None));

        field.focus(0, &mut events);
        assert_eq!(field.column(), Some(PickerColumn::Day));
        field.handle_key(&mut KeyEvent::new(KeyCode::ArrowDown), 1, &mut events);
        assert_eq!(field.focused_index(), Some(0));
        // February 1st is before the minimum
        assert_eq!(field.handle_key(&mut KeyEvent::new(KeyCode::Enter), 2, &mut events), NavOutcome::Ignored);
        assert!(field.is_open());
        assert_eq!(field.value(), None);

        // ArrowUp from the first day wraps to the 29th
        field.handle_key(&mut KeyEvent::new(KeyCode::ArrowUp), 3, &mut events);
        assert_eq!(field.focused_index(), Some(28));
        field.handle_key(&mut KeyEvent::new(KeyCode::Enter), 4, &mut events);
        assert_eq!(field.value(), Some("2024-02-29"));
    }

    #[test]
    fn test_date_time_columns() {
        let (ctx, bounds, mut events) = setup();
        let mut field = date_time(&ctx, bounds).default_value("2024-01-15T10:30");
        field.open(0, &mut events);
        assert_eq!(field.column(), Some(PickerColumn::Day));

        let mut left = KeyEvent::new(KeyCode::ArrowLeft);
        assert_eq!(field.handle_key(&mut left, 1, &mut events), NavOutcome::Ignored);
        assert!(!left.default_prevented());

        field.handle_key(&mut KeyEvent::new(KeyCode::ArrowDown), 2, &mut events);
        assert_eq!(field.focused_index(), Some(0));
        field.handle_key(&mut KeyEvent::new(KeyCode::ArrowRight), 3, &mut events);
        assert_eq!(field.column(), Some(PickerColumn::Hour));
        assert_eq!(field.focused_index(), None);

        for _ in 0..15 {
            field.handle_key(&mut KeyEvent::new(KeyCode::ArrowDown), 4, &mut events);
        }
        field.handle_key(&mut KeyEvent::new(KeyCode::Enter), 5, &mut events);
        assert_eq!(field.value(), Some("2024-01-15T14:30"));

        assert!(!time(&ctx, bounds).set_column(PickerColumn::Day));
    }

    #[test]
    fn test_controlled_text_shows_owner_value() {
        let (ctx, bounds, mut events) = setup();
        let (log, on_change) = recorder();
        let mut field = text(&ctx, bounds).value_controlled("owner").on_change(on_change);

        field.input("typed", 0);
        assert_eq!(field.value(), Some("owner"));
        assert_eq!(field.surface().value, "owner");
        assert_eq!(*log.lock().unwrap(), vec![Some("typed".to_string())]);

        assert!(field.clear(1, &mut events));
        assert_eq!(field.surface().value, "owner");
        assert_eq!(log.lock().unwrap().last(), Some(&None));

        field.set_value(Some("accepted".into()));
        assert_eq!(field.surface().value, "accepted");

        // handing control back shows the internal value again
        field.set_value(None);
        assert_eq!(field.value(), None);
        assert_eq!(field.surface().value, "");
        field.input("mine", 2);
        assert_eq!(field.surface().value, "mine");
        assert_eq!(field.value(), Some("mine"));
    }

    #[test]
    fn test_text_debounce() {
        let (ctx, bounds, _) = setup();
        let (log, on_change) = recorder();
        let mut field = text(&ctx, bounds).debounced().on_change(on_change);

        field.input("h", 0);
        field.input("he", 100);
        field.input("hey", 200);
        assert_eq!(field.surface().value, "hey");
        assert_eq!(field.next_deadline(), Some(700));
        assert!(!field.tick(699));
        assert!(log.lock().unwrap().is_empty());
        assert!(field.tick(700));
        assert_eq!(*log.lock().unwrap(), vec![Some("hey".to_string())]);
        assert_eq!(field.value(), Some("hey"));

        field.input("hey!", 800);
        field.blur();
        assert_eq!(log.lock().unwrap().last(), Some(&Some("hey!".to_string())));
        assert!(!field.tick(5_000));
    }

    #[test]
    fn test_text_without_debounce_and_teardown() {
        let (ctx, bounds, mut events) = setup();
        let (log, on_change) = recorder();
        let mut field = text(&ctx, bounds).debounce_ms(50).on_change(on_change);
        field.input("a", 0);
        field.teardown(&mut events);
        assert!(!field.tick(100));
        assert!(log.lock().unwrap().is_empty());

        let (log, on_change) = recorder();
        let mut plain = text(&ctx, bounds).on_change(on_change);
        plain.input("x", 0);
        plain.input("", 1);
        assert_eq!(*log.lock().unwrap(), vec![Some("x".to_string()), None]);
        assert!(!plain.open(2, &mut events));
        assert!(!plain.surface().read_only);
    }
}
