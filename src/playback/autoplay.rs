use std::time::{Duration, Instant};

/// Single rearming deadline that drives scene auto-advance.
///
/// At most one deadline is armed at a time; arming replaces any previous
/// deadline instead of stacking a second one.
#[derive(Clone, Copy, Debug)]
pub struct AutoplayTimer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl AutoplayTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Schedule the next fire a full interval after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    /// Drop the pending deadline.
    pub fn release(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fire once if the deadline elapsed, rearming from `now`.
    ///
    /// Rearming from `now` rather than from the missed deadline means a late
    /// caller advances one scene, not several.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/autoplay.rs"]
mod tests;
