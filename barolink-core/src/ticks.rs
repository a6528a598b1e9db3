//! Wraparound-safe tick arithmetic
//!
//! Tick sources are fixed-width counters that overflow back to zero. The
//! distance between two ticks is the wrapping difference reinterpreted as a
//! signed value of the same width, which stays correct across the overflow
//! boundary as long as the two ticks are less than half the range apart.

/// Signed distance from `last` to `now` in milliseconds
///
/// Positive when `now` is after `last`, even if the counter wrapped in
/// between.
pub fn ticks_diff(now: u32, last: u32) -> i32 {
    now.wrapping_sub(last) as i32
}

/// Longest period an [`Interval`] can measure
///
/// Elapsed time is a signed distance, so anything past half the counter
/// range would read as negative.
pub const MAX_PERIOD_MS: u32 = i32::MAX as u32;

/// Fixed-period schedule driven by an external tick source
///
/// Due when strictly more than `period_ms` has elapsed since the last
/// [`mark`](Self::mark). Periods are capped at [`MAX_PERIOD_MS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Interval {
    period_ms: u32,
    last: u32,
}

impl Interval {
    /// Create an interval whose period starts at `now`
    pub const fn new(period_ms: u32, now: u32) -> Self {
        let period_ms = if period_ms > MAX_PERIOD_MS {
            MAX_PERIOD_MS
        } else {
            period_ms
        };
        Self {
            period_ms,
            last: now,
        }
    }

    /// Configured period in milliseconds
    pub const fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Tick of the last mark
    pub const fn last(&self) -> u32 {
        self.last
    }

    /// Milliseconds elapsed since the last mark
    pub fn elapsed(&self, now: u32) -> i32 {
        ticks_diff(now, self.last)
    }

    /// Check whether the period has elapsed
    pub fn is_due(&self, now: u32) -> bool {
        self.elapsed(now) > self.period_ms as i32
    }

    /// Restart the period at `now`
    pub fn mark(&mut self, now: u32) {
        self.last = now;
    }

    /// Restart the period if it has elapsed
    ///
    /// Returns `true` when the caller should run the periodic work.
    pub fn poll(&mut self, now: u32) -> bool {
        if self.is_due(now) {
            self.mark(now);
            true
        } else {
            false
        }
    }
}
