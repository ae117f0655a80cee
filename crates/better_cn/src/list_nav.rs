//! Keyboard navigation over an ordered option list
//!
//! The navigator is stateless: the owning widget passes in whether its popover
//! is open, the current focus and the list, and applies the returned
//! [`NavOutcome`]. Focus movement wraps circularly and lands on disabled items
//! too; only committing checks the disabled flag.

use better_core::{KeyCode, KeyEvent, Modifiers};

/// What the owning widget should do in response to a key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    Open,
    Close,
    Focus(usize),
    Commit(usize),
    Ignored,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListNavigator {
    /// Space acts like Enter; only for lists without a free-text search
    space_commits: bool,
}

impl ListNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn space_commits(mut self, enabled: bool) -> Self {
        self.space_commits = enabled;
        self
    }

    /// Map a key-down to an outcome
    ///
    /// `is_enabled(i)` reports whether item `i` of the `len`-long list can be
    /// committed. Arrow keys and Enter always suppress the platform default;
    /// Space does when it acts as a command. Chords with Ctrl, Alt or Meta
    /// belong to the host's shortcuts and are ignored untouched.
    pub fn handle(
        &self,
        event: &mut KeyEvent,
        open: bool,
        focused: Option<usize>,
        len: usize,
        is_enabled: impl Fn(usize) -> bool,
    ) -> NavOutcome {
        let key = event.key;
        if event
            .modifiers
            .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META)
        {
            return NavOutcome::Ignored;
        }
        let outcome = match key {
            KeyCode::ArrowDown | KeyCode::ArrowUp => {
                event.prevent_default();
                if !open {
                    NavOutcome::Open
                } else {
                    match step(focused, len, key == KeyCode::ArrowDown) {
                        Some(index) => NavOutcome::Focus(index),
                        None => NavOutcome::Ignored,
                    }
                }
            }
            KeyCode::Enter => {
                event.prevent_default();
                self.confirm(open, focused, len, is_enabled)
            }
            KeyCode::Space if self.space_commits => {
                event.prevent_default();
                self.confirm(open, focused, len, is_enabled)
            }
            KeyCode::Escape => NavOutcome::Close,
            _ => NavOutcome::Ignored,
        };
        tracing::trace!(?key, ?focused, len, ?outcome, "list navigation");
        outcome
    }

    fn confirm(
        &self,
        open: bool,
        focused: Option<usize>,
        len: usize,
        is_enabled: impl Fn(usize) -> bool,
    ) -> NavOutcome {
        if !open {
            return NavOutcome::Open;
        }
        match focused {
            Some(index) if index < len && is_enabled(index) => NavOutcome::Commit(index),
            _ => NavOutcome::Ignored,
        }
    }
}

/// Next focus index with circular wrap; `None` for an empty list
pub fn step(focused: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let next = match (focused, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        // stale focus past the end restarts from the edge
        (Some(i), true) if i >= len => 0,
        (Some(i), false) if i >= len => len - 1,
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
    };
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(nav: &ListNavigator, key: KeyCode, open: bool, focused: Option<usize>, len: usize) -> (NavOutcome, bool) {
        let mut event = KeyEvent::new(key);
        let outcome = nav.handle(&mut event, open, focused, len, |_| true);
        (outcome, event.default_prevented())
    }

    fn press_n(nav: &ListNavigator, key: KeyCode, start: Option<usize>, times: usize, len: usize) -> Option<usize> {
        let mut focused = start;
        for _ in 0..times {
            if let (NavOutcome::Focus(i), _) = press(nav, key, true, focused, len) {
                focused = Some(i);
            }
        }
        focused
    }

    #[test]
    fn test_arrow_down_wraps_circularly() {
        let nav = ListNavigator::new();
        let n = 5;
        assert_eq!(press_n(&nav, KeyCode::ArrowDown, None, 1, n), Some(0));
        assert_eq!(press_n(&nav, KeyCode::ArrowDown, None, n, n), Some(n - 1));
        assert_eq!(press_n(&nav, KeyCode::ArrowDown, None, n + 1, n), Some(0));
        assert_eq!(press_n(&nav, KeyCode::ArrowDown, Some(0), n, n), Some(0));
        assert_eq!(press_n(&nav, KeyCode::ArrowUp, Some(2), n, n), Some(2));
    }

    #[test]
    fn test_stale_focus_restarts_from_edge() {
        assert_eq!(step(Some(9), 3, true), Some(0));
        assert_eq!(step(Some(9), 3, false), Some(2));
    }

    #[test]
    fn test_arrow_up_from_zero_wraps_to_end() {
        let nav = ListNavigator::new();
        assert_eq!(press(&nav, KeyCode::ArrowUp, true, Some(0), 4).0, NavOutcome::Focus(3));
        assert_eq!(press(&nav, KeyCode::ArrowUp, true, None, 4).0, NavOutcome::Focus(3));
    }

    #[test]
    fn test_arrows_open_when_closed() {
        let nav = ListNavigator::new();
        let (outcome, prevented) = press(&nav, KeyCode::ArrowDown, false, None, 3);
        assert_eq!(outcome, NavOutcome::Open);
        assert!(prevented);
    }

    #[test]
    fn test_empty_list_is_noop() {
        let nav = ListNavigator::new();
        assert_eq!(press(&nav, KeyCode::ArrowDown, true, None, 0).0, NavOutcome::Ignored);
        assert_eq!(press(&nav, KeyCode::Enter, true, None, 0).0, NavOutcome::Ignored);
        assert_eq!(step(None, 0, true), None);
    }

    #[test]
    fn test_enter_commits_enabled_focus_only() {
        let nav = ListNavigator::new();
        let mut event = KeyEvent::new(KeyCode::Enter);
        assert_eq!(nav.handle(&mut event, true, Some(1), 2, |i| i != 1), NavOutcome::Ignored);
        assert!(event.default_prevented());

        let mut event = KeyEvent::new(KeyCode::Enter);
        assert_eq!(nav.handle(&mut event, true, Some(0), 2, |i| i != 1), NavOutcome::Commit(0));

        assert_eq!(press(&nav, KeyCode::Enter, true, Some(7), 2).0, NavOutcome::Ignored);
        assert_eq!(press(&nav, KeyCode::Enter, false, Some(0), 2).0, NavOutcome::Open);
    }

    #[test]
    fn test_escape_always_closes() {
        let nav = ListNavigator::new();
        assert_eq!(press(&nav, KeyCode::Escape, true, Some(1), 3), (NavOutcome::Close, false));
        assert_eq!(press(&nav, KeyCode::Escape, false, None, 3).0, NavOutcome::Close);
    }

    #[test]
    fn test_space_only_with_flag() {
        let searchable = ListNavigator::new();
        assert_eq!(press(&searchable, KeyCode::Space, true, Some(0), 2), (NavOutcome::Ignored, false));

        let plain = ListNavigator::new().space_commits(true);
        assert_eq!(press(&plain, KeyCode::Space, true, Some(0), 2), (NavOutcome::Commit(0), true));
        assert_eq!(press(&plain, KeyCode::Space, false, None, 2).0, NavOutcome::Open);
    }

    #[test]
    fn test_other_keys_pass_through() {
        let nav = ListNavigator::new();
        assert_eq!(press(&nav, KeyCode::Char('a'), true, None, 2), (NavOutcome::Ignored, false));
        assert_eq!(press(&nav, KeyCode::Tab, true, None, 2), (NavOutcome::Ignored, false));
    }

    #[test]
    fn test_shortcut_chords_pass_through() {
        let nav = ListNavigator::new();
        let mut event = KeyEvent::new(KeyCode::ArrowDown).with_modifiers(Modifiers::CTRL);
        assert_eq!(nav.handle(&mut event, true, Some(0), 3, |_| true), NavOutcome::Ignored);
        assert!(!event.default_prevented());

        let mut event = KeyEvent::new(KeyCode::ArrowDown).with_modifiers(Modifiers::SHIFT);
        assert_eq!(nav.handle(&mut event, true, Some(0), 3, |_| true), NavOutcome::Focus(1));
    }
}
