//! Clock seam for answer timestamps

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of record timestamps (milliseconds since Unix epoch)
pub trait Clock {
    /// Current time in milliseconds
    fn now_millis(&self) -> u64;
}

/// Wall clock that never goes backwards
///
/// Remembers the last value handed out and never returns less, so records
/// stamped by one clock are non-decreasing even if the system time steps back.
#[derive(Debug, Default)]
pub struct SystemClock {
    last: AtomicU64,
}

impl SystemClock {
    /// Create a new clock
    pub fn new() -> Self {
        Self::default()
    }

    fn wall_millis() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        let now = Self::wall_millis();
        let previous = self.last.fetch_max(now, Ordering::Relaxed);
        previous.max(now)
    }
}

/// Clock frozen at one instant, for tests and reproducible output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_non_decreasing() {
        let clock = SystemClock::new();
        let mut previous = clock.now_millis();
        for _ in 0..1000 {
            let now = clock.now_millis();
            assert!(now >= previous);
            previous = now;
        }
    }

    #[test]
    fn test_system_clock_ignores_backwards_step() {
        let clock = SystemClock::new();
        // Simulate a clock that already handed out a time in the future
        let future = SystemClock::wall_millis() + 60_000;
        clock.last.store(future, Ordering::Relaxed);
        assert_eq!(clock.now_millis(), future);
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(42);
        assert_eq!(clock.now_millis(), 42);
    }
}
