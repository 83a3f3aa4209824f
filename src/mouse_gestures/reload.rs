use std::time::{Duration, Instant};

/// Coalesces bursts of reload requests into one reload after `delay`.
///
/// Scheduling while a reload is already pending keeps the original deadline.
#[derive(Debug, Clone)]
pub struct ReloadDebouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl ReloadDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Returns `true` if this call armed the timer.
    pub fn schedule(&mut self, now: Instant) -> bool {
        if self.deadline.is_some() {
            return false;
        }
        self.deadline = Some(now + self.delay);
        true
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Disarm and return `true` once the deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
