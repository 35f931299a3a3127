use std::time::{Duration, Instant};

/// Fixed-interval clock for the game loop.
///
/// The host asks how long it may wait for input, then whether a tick is due.
/// Falling more than one interval behind does not cause a burst of catch-up
/// ticks; the schedule restarts from the late tick instead.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next: Instant,
}

impl Ticker {
    pub fn start(interval: Duration, now: Instant) -> Self {
        Ticker { interval, next: now + interval }
    }

    pub fn until_next(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    /// True at most once per interval.
    pub fn due(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }

        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
        true
    }
}
