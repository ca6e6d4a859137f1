//! Autoplay timer on a host-driven logical clock.
//!
//! The timer never reads wall time. The host feeds elapsed time through
//! [`AutoplayTimer::advance`], which fires at most one tick per call and
//! carries any surplus forward. A host that fell behind sees
//! [`AutoplayTimer::until_next_tick`] return zero and keeps calling until
//! the backlog is drained, one tick at a time.
//!
//! Cancellation is immediate and total. Interval changes apply from the
//! moment of change.

use std::time::Duration;

/// Smallest interval the timer accepts.
const TIMER_FLOOR: Duration = Duration::from_millis(1);

/// Repeating, cancelable timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoplayTimer {
    /// Tick interval.
    interval: Duration,
    /// Time accrued since the last tick (or since arming).
    elapsed: Duration,
    /// Whether ticks are being produced.
    armed: bool,
    /// Ticks fired since the timer was created.
    fired: u64,
}

impl AutoplayTimer {
    /// Create a disarmed timer with the given interval.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(TIMER_FLOOR),
            elapsed: Duration::ZERO,
            armed: false,
            fired: 0,
        }
    }

    /// Current interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Check if the timer is producing ticks.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    /// Total ticks fired.
    #[must_use]
    pub const fn fired(&self) -> u64 {
        self.fired
    }

    /// Start ticking; the first tick falls one interval from now.
    pub fn arm(&mut self) {
        self.armed = true;
        self.elapsed = Duration::ZERO;
    }

    /// Stop ticking. No tick fires after this returns.
    pub fn cancel(&mut self) {
        self.armed = false;
        self.elapsed = Duration::ZERO;
    }

    /// Change the interval.
    ///
    /// Time accrued under the old interval is discarded: the next tick fires
    /// one new interval after the change, never retroactively.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval.max(TIMER_FLOOR);
        self.elapsed = Duration::ZERO;
    }

    /// Advance the logical clock by `dt`.
    ///
    /// Returns `true` if a tick fired. At most one tick fires per call; time
    /// beyond it stays accrued for the next call. A disarmed timer never
    /// fires.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if !self.armed {
            return false;
        }

        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed < self.interval {
            return false;
        }
        self.elapsed -= self.interval;
        self.fired = self.fired.saturating_add(1);
        true
    }

    /// Check if a tick is already due without feeding more time.
    #[must_use]
    pub fn is_due(&self) -> bool {
        self.armed && self.elapsed >= self.interval
    }

    /// Time left until the next tick, if armed. Zero while a backlog remains.
    #[must_use]
    pub fn until_next_tick(&self) -> Option<Duration> {
        self.armed
            .then(|| self.interval.saturating_sub(self.elapsed))
    }
}

impl Default for AutoplayTimer {
    fn default() -> Self {
        Self::new(super::SpeedPreset::default().interval())
    }
}
