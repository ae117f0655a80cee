//! Cancelable timers driven by host time
//!
//! Nothing here sleeps or spawns. Callers pass the current time in
//! milliseconds and poll; a timer fires at most once per `start`.
//!
//! - [`Timer`]: one deadline, restarted or canceled by newer state
//! - [`Debouncer`]: latest-value-wins propagation after a quiet period
//! - [`TimerQueue`]: many keyed deadlines with payloads (alert auto-dismiss)

use slotmap::{new_key_type, SlotMap};

/// Default quiet period for debounced text-field propagation
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// A single cancelable deadline
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<u64>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)start the timer. Any pending deadline is superseded.
    pub fn start(&mut self, now_ms: u64, delay_ms: u64) {
        self.deadline = Some(now_ms.saturating_add(delay_ms));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Consume the deadline if it has passed
    pub fn fire(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

// =============================================================================
// DEBOUNCER
// =============================================================================

/// Holds back a value until no newer value arrived for `delay_ms`
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    delay_ms: u64,
    timer: Timer,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            timer: Timer::new(),
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Queue a value, restarting the quiet period
    pub fn push(&mut self, value: T, now_ms: u64) {
        self.pending = Some(value);
        self.timer.start(now_ms, self.delay_ms);
    }

    /// Release the pending value once the quiet period has elapsed
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        if self.timer.fire(now_ms) {
            self.pending.take()
        } else {
            None
        }
    }

    /// Release the pending value immediately
    pub fn flush(&mut self) -> Option<T> {
        self.timer.cancel();
        self.pending.take()
    }

    /// Drop the pending value without releasing it
    pub fn cancel(&mut self) {
        self.timer.cancel();
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<u64> {
        self.timer.deadline()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

// =============================================================================
// TIMER QUEUE
// =============================================================================

new_key_type! {
    /// Handle to a scheduled entry in a [`TimerQueue`]
    pub struct TimerId;
}

#[derive(Debug)]
struct Scheduled<T> {
    deadline: u64,
    /// Insertion sequence, breaks deadline ties
    seq: u64,
    payload: T,
}

/// Keyed deadlines carrying a payload
#[derive(Debug)]
pub struct TimerQueue<T> {
    entries: SlotMap<TimerId, Scheduled<T>>,
    next_seq: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            next_seq: 0,
        }
    }

    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, payload: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(Scheduled {
            deadline: now_ms.saturating_add(delay_ms),
            seq,
            payload,
        })
    }

    /// Cancel an entry, returning its payload if it was still scheduled
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        self.entries.remove(id).map(|s| s.payload)
    }

    /// Remove and return every entry whose deadline has passed, earliest first
    pub fn advance(&mut self, now_ms: u64) -> Vec<(TimerId, T)> {
        let mut due: Vec<(TimerId, u64, u64)> = self
            .entries
            .iter()
            .filter(|(_, s)| s.deadline <= now_ms)
            .map(|(id, s)| (id, s.deadline, s.seq))
            .collect();
        due.sort_by_key(|&(_, deadline, seq)| (deadline, seq));

        due.into_iter()
            .filter_map(|(id, _, _)| self.entries.remove(id).map(|s| (id, s.payload)))
            .collect()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.values().map(|s| s.deadline).min()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
