//! Cancel-and-restart single-shot timer.
//!
//! Time is whatever monotonic clock the host uses, expressed as a
//! [`Duration`] since an arbitrary epoch. The debouncer never reads a clock
//! itself, so it works the same under `no_std`, in a browser event loop, or
//! in tests.

use core::time::Duration;

/// Collapses a burst of triggers into one firing after a quiet window.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Duration>,
}

impl Debouncer {
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Restart the timer at `now`, dropping any pending deadline.
    pub fn schedule(&mut self, now: Duration) {
        self.deadline = Some(now.saturating_add(self.window));
    }

    /// Drop the pending deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// When the pending timer will fire, if any.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// True exactly once per burst, at the first call with `now >= deadline`.
    pub fn fire(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
