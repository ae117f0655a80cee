//! Alerts - a stack of transient feedback messages
//!
//! Alerts are listed oldest first. Each may carry an auto-dismiss duration,
//! scheduled on a [`TimerQueue`]; dismissing an alert by hand cancels its
//! timer, and [`AlertStack::teardown`] drops every pending timer.

use better_core::{TimerId, TimerQueue};
use better_theme::{Color, ColorToken, IconData, ThemeContext};
use indexmap::IndexMap;

/// Alert severity variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlertVariant {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl AlertVariant {
    fn token(&self) -> ColorToken {
        match self {
            AlertVariant::Info => ColorToken::Info,
            AlertVariant::Success => ColorToken::Success,
            AlertVariant::Warning => ColorToken::Warning,
            AlertVariant::Error => ColorToken::Error,
        }
    }

    pub fn background(&self, ctx: &ThemeContext) -> Color {
        ctx.color(self.token()).with_alpha(0.1)
    }

    pub fn border(&self, ctx: &ThemeContext) -> Color {
        ctx.color(self.token())
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            AlertVariant::Info => "info",
            AlertVariant::Success => "check",
            AlertVariant::Warning => "warning",
            AlertVariant::Error => "x",
        }
    }

    /// Leading icon from the context's registry
    pub fn icon<'a>(&self, ctx: &'a ThemeContext) -> &'a IconData {
        ctx.icon(self.icon_name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlertId(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub variant: AlertVariant,
    pub title: String,
    pub description: Option<String>,
    /// Auto-dismiss after this many ms
    pub duration_ms: Option<u64>,
}

impl Alert {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            variant: AlertVariant::default(),
            title: title.into(),
            description: None,
            duration_ms: None,
        }
    }

    pub fn variant(mut self, variant: AlertVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn duration_ms(mut self, duration: u64) -> Self {
        self.duration_ms = Some(duration);
        self
    }

    /// Keep until dismissed, even if the stack has a default duration
    pub fn sticky(mut self) -> Self {
        self.duration_ms = Some(0);
        self
    }
}

pub fn alert(title: impl Into<String>) -> Alert {
    Alert::new(title)
}

#[derive(Debug)]
struct Entry {
    alert: Alert,
    timer: Option<TimerId>,
}

#[derive(Debug, Default)]
pub struct AlertStack {
    entries: IndexMap<AlertId, Entry>,
    timers: TimerQueue<AlertId>,
    next_id: u64,
    default_duration_ms: Option<u64>,
    max_visible: Option<usize>,
}

impl AlertStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Auto-dismiss delay for alerts without their own duration
    pub fn default_duration_ms(mut self, duration: u64) -> Self {
        self.default_duration_ms = Some(duration);
        self
    }

    /// Drop the oldest alerts beyond `max`
    pub fn max_visible(mut self, max: usize) -> Self {
        self.max_visible = Some(max.max(1));
        self
    }

    pub fn push(&mut self, alert: Alert, now_ms: u64) -> AlertId {
        let id = AlertId(self.next_id);
        self.next_id += 1;
        let timer = match alert.duration_ms.or(self.default_duration_ms) {
            Some(0) | None => None,
            Some(duration) => Some(self.timers.schedule(now_ms, duration, id)),
        };
        tracing::debug!(?id, variant = ?alert.variant, "alert shown");
        self.entries.insert(id, Entry { alert, timer });

        if let Some(max) = self.max_visible {
            while self.entries.len() > max {
                if let Some(oldest) = self.entries.keys().next().copied() {
                    self.dismiss(oldest);
                }
            }
        }
        id
    }

    pub fn dismiss(&mut self, id: AlertId) -> Option<Alert> {
        let entry = self.entries.shift_remove(&id)?;
        if let Some(timer) = entry.timer {
            self.timers.cancel(timer);
        }
        tracing::debug!(?id, "alert dismissed");
        Some(entry.alert)
    }

    /// Dismiss every alert whose timer is due; returns them in expiry order
    pub fn tick(&mut self, now_ms: u64) -> Vec<AlertId> {
        self.timers
            .advance(now_ms)
            .into_iter()
            .filter_map(|(_, id)| self.entries.shift_remove(&id).map(|_| id))
            .collect()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Alerts oldest first
    pub fn iter(&self) -> impl Iterator<Item = (AlertId, &Alert)> {
        self.entries.iter().map(|(id, e)| (*id, &e.alert))
    }

    pub fn get(&self, id: AlertId) -> Option<&Alert> {
        self.entries.get(&id).map(|e| &e.alert)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn teardown(&mut self) {
        self.entries.clear();
        self.timers.clear();
    }
}
