//! Process-wide request tally.
//!
//! A single `AtomicU64`, incremented by every request-handling task and read
//! by the throughput reporter. `Ordering::Relaxed` is sufficient: there is one
//! counter and no cross-variable ordering requirement, only a monotone tally.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotone request counter shared between handlers and the reporter.
///
/// Initialized to 0 at construction; never decremented; lives for the whole
/// process.
#[derive(Debug, Default)]
pub struct RequestCounter {
    value: AtomicU64,
}

impl RequestCounter {
    pub fn new() -> Self {
        Self {
            value: AtomicU64::new(0),
        }
    }

    /// Add 1 and return the post-increment value.
    ///
    /// The returned value is unique per call, so under concurrent increments
    /// exactly one caller observes any given total. Handler policies that key
    /// off the running total (threshold crossings) must use this value, not a
    /// separate `snapshot`.
    pub fn increment(&self) -> u64 {
        self.value.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Current value. Never blocks writers; reflects every increment that
    /// completed before the read started.
    pub fn snapshot(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let c = RequestCounter::new();
        assert_eq!(c.snapshot(), 0);
    }

    #[test]
    fn increment_returns_post_increment_value() {
        let c = RequestCounter::new();
        assert_eq!(c.increment(), 1);
        assert_eq!(c.increment(), 2);
        assert_eq!(c.snapshot(), 2);
    }
}
