//! Per-tick throughput math for the reporter.
//!
//! Kept free of clocks and timers so the tick arithmetic can be tested
//! without a runtime; the reporter task owns the actual interval.

/// Smallest interval we will divide by, in seconds. Anything below this
/// (including negative elapsed after a clock adjustment) is treated as a
/// degenerate tick.
const MIN_ELAPSED_SECS: f64 = 1e-6;

/// One emitted reporter sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThroughputTick {
    /// Total requests observed so far.
    pub total: u64,
    /// Requests per second over the interval that just ended.
    pub rate: f64,
    /// Length of that interval in seconds.
    pub elapsed_secs: f64,
}

/// Two-point window over the counter: remembers the previous tick's count and
/// turns `(count, elapsed)` pairs into rates.
#[derive(Debug, Default)]
pub struct ThroughputWindow {
    last_count: u64,
}

impl ThroughputWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the window to `count`, `elapsed_secs` after the previous tick.
    ///
    /// Returns `None` for degenerate intervals (elapsed at or below zero);
    /// the window still advances so the next tick is measured from here and
    /// no division takes place.
    pub fn advance(&mut self, count: u64, elapsed_secs: f64) -> Option<ThroughputTick> {
        // The counter is monotone, so this saturation never fires in
        // practice; it keeps the window panic-free on any input.
        let delta = count.saturating_sub(self.last_count);
        self.last_count = count;

        if elapsed_secs < MIN_ELAPSED_SECS {
            return None;
        }

        Some(ThroughputTick {
            total: count,
            rate: delta as f64 / elapsed_secs,
            elapsed_secs,
        })
    }
}
