//! Trailing-edge coalescing of rapid input events (debounce).
//!
//! Times are offsets from an arbitrary origin so the policy can be driven
//! by a real clock or by a test script.

use std::time::Duration;

pub const DEFAULT_WINDOW: Duration = Duration::from_millis(300);

/// A value observed at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timed<T> {
    pub at: Duration,
    pub value: T,
}

impl<T> Timed<T> {
    pub fn new(at: Duration, value: T) -> Self {
        Self { at, value }
    }
}

/// Collapse an event stream: an event survives iff the next one arrives at
/// or after its deadline (`at + window`). Survivors are emitted at their
/// deadline. Input must be ordered by time.
pub fn coalesce<T>(events: Vec<Timed<T>>, window: Duration) -> Vec<Timed<T>> {
    let mut out = Vec::new();
    let mut events = events.into_iter().peekable();
    while let Some(event) = events.next() {
        let deadline = event.at + window;
        let superseded = events.peek().map(|next| next.at < deadline).unwrap_or(false);
        if !superseded {
            out.push(Timed::new(deadline, event.value));
        }
    }
    out
}

/// Stateful form of [`coalesce`]: `push` records the latest value and resets
/// the deadline, `poll` hands the value out once the window has passed.
#[derive(Debug, Clone)]
pub struct CoalescingWindow<T> {
    window: Duration,
    pending: Option<Timed<T>>,
}

impl<T> CoalescingWindow<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn push(&mut self, at: Duration, value: T) {
        self.pending = Some(Timed::new(at + self.window, value));
    }

    /// When the pending value fires, if any
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.at)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn poll(&mut self, now: Duration) -> Option<T> {
        let ready = matches!(&self.pending, Some(p) if now >= p.at);
        if ready {
            self.pending.take().map(|p| p.value)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }
}

impl<T> Default for CoalescingWindow<T> {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}
