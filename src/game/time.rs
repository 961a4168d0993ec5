//! Periodic reporting clock
//!
//! Counts how many reporting periods fall inside each frame. Time is kept
//! as whole `Duration`s so long runs do not drift, and a stalled frame that
//! spans several periods reports all of them at once.

use std::time::Duration;

use crate::config::Settings;

pub struct IntervalTimer {
    period: Duration,
    /// Time since the last period boundary, always below `period`
    pending: Duration,
    total: Duration,
    periods: u64,
}

impl IntervalTimer {
    /// A zero period is raised to one nanosecond
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_nanos(1)),
            pending: Duration::ZERO,
            total: Duration::ZERO,
            periods: 0,
        }
    }

    /// One period every `frames` ideal frames at the configured rate
    pub fn every_frames(frames: u32, settings: &Settings) -> Self {
        Self::new(settings.frame_time() * frames)
    }

    /// Account for a frame that took `delta`; returns the periods it completed
    pub fn advance(&mut self, delta: Duration) -> u64 {
        self.total += delta;
        let pending = self.pending.as_nanos() + delta.as_nanos();
        let period = self.period.as_nanos();

        let due = u64::try_from(pending / period).unwrap_or(u64::MAX);
        // Remainder is below `period`, which fits in u64 nanoseconds
        self.pending = Duration::from_nanos((pending % period) as u64);
        self.periods = self.periods.saturating_add(due);
        due
    }

    /// Wall or simulated time fed in so far
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Periods completed so far
    pub fn periods(&self) -> u64 {
        self.periods
    }
}
