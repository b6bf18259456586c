//! Quiet-period debouncer.

use std::time::{Duration, Instant};

/// Default quiet window before a burst of events counts as settled.
pub const DEBOUNCE_MS: u64 = 100;

/// Pure timing helper: tracks the last raw event and reports how long to
/// keep waiting before the burst is settled.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    last_event: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_MS))
    }
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_event: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a raw event.
    pub fn note(&mut self, at: Instant) {
        self.last_event = Some(at);
    }

    /// Time left until the window closes, or `None` once settled.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let last = self.last_event?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed >= self.window {
            None
        } else {
            Some(self.window - elapsed)
        }
    }

    pub fn reset(&mut self) {
        self.last_event = None;
    }
}
