//! Deadline scheduler for periodic work on a single-threaded loop
//!
//! A `Ticker` fires at most once per call to [`Ticker::poll`]. When the loop
//! wakes up late, missed deadlines are skipped rather than queued, so a
//! stalled loop never replays a burst of ticks.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next: Instant,
    fired: u64,
    skipped: u64,
}

impl Ticker {
    /// Create a ticker whose first deadline is one period after `start`.
    pub fn new(period: Duration, start: Instant) -> Self {
        let period = period.max(Duration::from_millis(1));
        Self {
            period,
            next: start + period,
            fired: 0,
            skipped: 0,
        }
    }

    /// Returns true when a deadline has passed, then schedules the next one
    /// strictly after `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }

        let behind = now.duration_since(self.next).as_nanos();
        let period = self.period.as_nanos();
        let missed = behind / period;
        let advance = period.saturating_mul(missed + 1);
        let advance = Duration::from_nanos(u64::try_from(advance).unwrap_or(u64::MAX));

        self.next += advance;
        self.fired += 1;
        self.skipped += u64::try_from(missed).unwrap_or(u64::MAX);
        true
    }

    /// Time left until the next deadline (zero if already due)
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    pub fn next_deadline(&self) -> Instant {
        self.next
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of deadlines that fired
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Number of deadlines dropped because the loop woke up late
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}
