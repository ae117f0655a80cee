//! Open/close lifecycle with a delayed unmount
//!
//! ```text
//!            open()                 close()
//!   Closed ─────────▶ Open ───────────────────▶ Closing { unmount_at }
//!     ▲                ▲                               │
//!     │                └──────── open() ───────────────┤
//!     └─────────────── tick(now >= unmount_at) ────────┘
//! ```
//!
//! While `Closing` the content is hidden but still mounted so an exit
//! animation can play. Reopening cancels the pending unmount. This is the only
//! place in the crate that schedules the Closing → Closed transition.

use better_theme::ThemeContext;

/// Exit delay used when no theme is supplied
pub const DEFAULT_EXIT_DELAY_MS: u64 = 200;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PopoverState {
    #[default]
    Closed,
    Open,
    /// Hidden, unmounts at the given time
    Closing { unmount_at: u64 },
}

#[derive(Clone, Debug)]
pub struct Popover {
    state: PopoverState,
    exit_delay_ms: u64,
}

impl Default for Popover {
    fn default() -> Self {
        Self::new(DEFAULT_EXIT_DELAY_MS)
    }
}

impl Popover {
    pub fn new(exit_delay_ms: u64) -> Self {
        Self {
            state: PopoverState::Closed,
            exit_delay_ms,
        }
    }

    /// Exit delay taken from the theme's transition duration
    pub fn from_context(ctx: &ThemeContext) -> Self {
        Self::new(ctx.transition_ms())
    }

    pub fn state(&self) -> PopoverState {
        self.state
    }

    pub fn exit_delay_ms(&self) -> u64 {
        self.exit_delay_ms
    }

    /// Content should be shown
    pub fn is_open(&self) -> bool {
        self.state == PopoverState::Open
    }

    pub fn is_closing(&self) -> bool {
        matches!(self.state, PopoverState::Closing { .. })
    }

    /// Content should exist in the tree (open or animating out)
    pub fn is_mounted(&self) -> bool {
        self.state != PopoverState::Closed
    }

    /// Show immediately. Returns `false` if already open.
    pub fn open(&mut self, _now_ms: u64) -> bool {
        match self.state {
            PopoverState::Open => false,
            PopoverState::Closing { .. } => {
                tracing::debug!("popover reopened, unmount canceled");
                self.state = PopoverState::Open;
                true
            }
            PopoverState::Closed => {
                tracing::debug!("popover opened");
                self.state = PopoverState::Open;
                true
            }
        }
    }

    /// Hide immediately and schedule the unmount. Returns `false` if not open.
    pub fn close(&mut self, now_ms: u64) -> bool {
        if self.state != PopoverState::Open {
            return false;
        }
        let unmount_at = now_ms.saturating_add(self.exit_delay_ms);
        tracing::debug!(unmount_at, "popover closing");
        self.state = PopoverState::Closing { unmount_at };
        true
    }

    pub fn toggle(&mut self, now_ms: u64) -> bool {
        if self.is_open() {
            self.close(now_ms)
        } else {
            self.open(now_ms)
        }
    }

    /// Apply a due unmount. Returns whether the state changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.state {
            PopoverState::Closing { unmount_at } if now_ms >= unmount_at => {
                tracing::debug!("popover unmounted");
                self.state = PopoverState::Closed;
                true
            }
            _ => false,
        }
    }

    /// When the host should call [`tick`](Self::tick) next
    pub fn next_deadline(&self) -> Option<u64> {
        match self.state {
            PopoverState::Closing { unmount_at } => Some(unmount_at),
            _ => None,
        }
    }

    /// Teardown: drop any pending transition and go straight to `Closed`
    pub fn cancel(&mut self) {
        self.state = PopoverState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_keeps_mounted_until_delay() {
        let mut popover = Popover::default();
        assert!(popover.open(0));
        assert!(!popover.open(5));
        assert!(popover.close(100));
        assert!(!popover.is_open());
        assert!(popover.is_mounted());
        assert_eq!(popover.next_deadline(), Some(300));

        assert!(!popover.tick(299));
        assert!(popover.is_closing());
        assert!(popover.tick(300));
        assert_eq!(popover.state(), PopoverState::Closed);
        assert!(!popover.is_mounted());
    }

    #[test]
    fn test_reopen_cancels_unmount() {
        let mut popover = Popover::new(200);
        popover.open(0);
        popover.close(10);
        assert!(popover.open(50));
        assert!(popover.is_open());
        assert!(!popover.tick(1_000));
        assert!(popover.is_open());
    }

    #[test]
    fn test_toggle_and_cancel() {
        let mut popover = Popover::new(200);
        assert!(popover.toggle(0));
        assert!(popover.is_open());
        assert!(popover.toggle(10));
        assert!(popover.is_closing());
        popover.cancel();
        assert_eq!(popover.state(), PopoverState::Closed);
        assert!(!popover.close(20));
    }

    #[test]
    fn test_exit_delay_from_theme() {
        let ctx = ThemeContext::from_toml_str("transition_ms = 80").unwrap();
        let mut popover = Popover::from_context(&ctx);
        popover.open(0);
        popover.close(0);
        assert_eq!(popover.next_deadline(), Some(80));
    }
}
