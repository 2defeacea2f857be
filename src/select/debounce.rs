//! Quiet-period gate for the query text
//!
//! Holds at most one pending value. Every submit replaces the previous one
//! and restarts the clock, so only the deadline from the most recent
//! keystroke can ever fire and the committed value always lags the raw
//! value by exactly one quiet period.

use std::time::{Duration, Instant};

pub struct Debouncer {
    quiet: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Schedule `value` to commit after the quiet period, cancelling any
    /// previously scheduled value
    pub fn submit(&mut self, value: String, now: Instant) {
        self.pending = Some((value, now + self.quiet));
    }

    /// Take the pending value if its deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
