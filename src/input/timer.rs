use std::time::{Duration, Instant};

/// Single cancellable deadline for releasing raw capture after a stroke ends.
///
/// Lives in router state and is only touched from the owning thread, so scheduling,
/// cancelling and firing are ordered with respect to stroke transitions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DisarmTimer {
    deadline: Option<Instant>,
}

impl DisarmTimer {
    /// Replace any pending deadline with `now + delay`.
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Returns whether a deadline was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fire at most once: true when a deadline was pending and `now` reached it.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/timer.rs"]
mod tests;
