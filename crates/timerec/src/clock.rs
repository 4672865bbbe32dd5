//! Time sources.
//!
//! The watchdog and the "show time" menu entry read time through the
//! [`Clock`] trait so tests can drive time by hand.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

/// Source of monotonic and wall-clock time.
pub trait Clock: fmt::Debug {
    /// Monotonic time elapsed since an arbitrary, fixed origin.
    ///
    /// Successive calls never go backwards.
    fn now(&self) -> Duration;

    /// Current local date and time.
    fn wall_time(&self) -> DateTime<Local>;
}

/// Production clock backed by [`Instant`] and the system wall clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose monotonic origin is the moment of creation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn wall_time(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Manually advanced clock.
///
/// Clones share the same time, so a test can keep one handle and hand
/// another to the component under test.
#[derive(Debug, Clone)]
pub struct ManualClock {
    elapsed: Rc<Cell<Duration>>,
    wall_origin: DateTime<Local>,
}

impl ManualClock {
    /// Create a clock at monotonic time zero, anchored to `wall_origin`.
    #[must_use]
    pub fn new(wall_origin: DateTime<Local>) -> Self {
        Self {
            elapsed: Rc::new(Cell::new(Duration::ZERO)),
            wall_origin,
        }
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get().saturating_add(by));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Local::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.elapsed.get()
    }

    fn wall_time(&self) -> DateTime<Local> {
        chrono::Duration::from_std(self.elapsed.get())
            .ok()
            .and_then(|d| self.wall_origin.checked_add_signed(d))
            .unwrap_or(self.wall_origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn test_manual_clock_starts_at_zero() {
        let clock = ManualClock::default();
        assert_eq!(clock.now(), Duration::ZERO);
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::default();
        let handle = clock.clone();
        handle.advance(Duration::from_secs(3));
        assert_eq!(clock.now(), Duration::from_secs(3));
    }

    #[test]
    fn test_manual_clock_wall_time_follows_elapsed() {
        let origin = Local::now();
        let clock = ManualClock::new(origin);
        clock.advance(Duration::from_secs(90));
        assert_eq!(clock.wall_time() - origin, chrono::Duration::seconds(90));
    }
}
