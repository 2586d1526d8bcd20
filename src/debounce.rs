//! Quiet-period coalescing for search boxes. Time is passed in explicitly so
//! the event loop drives it from its poll tick and tests stay deterministic.

use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct Debounced<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debounced<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records a new value; restarts the quiet period.
    pub fn set(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Releases the pending value once `delay` has passed since the last `set`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = match &self.pending {
            Some((_, at)) => now.saturating_duration_since(*at) >= self.delay,
            None => false,
        };
        if !due {
            return None;
        }
        self.pending.take().map(|(value, _)| value)
    }

    /// Releases the pending value immediately (Enter in a search box).
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
#[path = "tests/debounce_tests.rs"]
mod tests;
