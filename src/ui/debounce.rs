//! Trailing-edge debounce: only the last trigger in a burst fires

use std::time::{Duration, Instant};

/// Quiet interval for resize and file-change bursts
pub(crate) const DEBOUNCE_QUIET_MS: u64 = 250;

#[derive(Debug, Clone)]
pub(crate) struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub(crate) fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Cancel any pending fire and schedule a new one `quiet` after `now`
    pub(crate) fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True once when the pending deadline has passed
    pub(crate) fn fire_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_QUIET_MS))
    }
}
