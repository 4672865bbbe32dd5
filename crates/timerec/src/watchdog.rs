//! Polling software watchdog.
//!
//! The watchdog must be kicked at least once per timeout. Expiry is not
//! signalled asynchronously: it is observed the next time the host loop
//! calls [`Watchdog::check`].
//!
//! ```text
//!             init()                 check() after timeout
//! Disabled ───────────► Armed ─────────────────────────► Expired
//!    ▲                  ▲  │ kick()                        │
//!    │                  │  └───────┘                       │
//!    │                  └──────────── kick() ──────────────┘
//!    └──────────────── disable() (from any state)
//! ```

use std::time::Duration;

use tracing::{debug, warn};

use crate::clock::Clock;

/// Default time allowed between kicks.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Watchdog state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatchdogStatus {
    /// Not supervising.
    #[default]
    Disabled,
    /// Supervising and kicked within the timeout.
    Armed,
    /// A check observed that the timeout elapsed without a kick.
    Expired,
}

impl WatchdogStatus {
    /// Get the status as a string slice.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Armed => "armed",
            Self::Expired => "expired",
        }
    }
}

impl std::fmt::Display for WatchdogStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Software watchdog driven by an injected clock.
#[derive(Debug)]
pub struct Watchdog<C: Clock> {
    clock: C,
    timeout: Duration,
    enabled: bool,
    expired: bool,
    last_kick: Duration,
}

impl<C: Clock> Watchdog<C> {
    /// Create a disabled watchdog.
    #[must_use]
    pub fn new(clock: C, timeout: Duration) -> Self {
        Self {
            clock,
            timeout,
            enabled: false,
            expired: false,
            last_kick: Duration::ZERO,
        }
    }

    /// Create a disabled watchdog with [`DEFAULT_TIMEOUT`].
    #[must_use]
    pub fn with_default_timeout(clock: C) -> Self {
        Self::new(clock, DEFAULT_TIMEOUT)
    }

    /// Enable and arm the watchdog, starting a fresh timeout period.
    pub fn init(&mut self) {
        self.enabled = true;
        self.expired = false;
        self.last_kick = self.clock.now();
        debug!(timeout_secs = self.timeout.as_secs_f64(), "Watchdog armed");
    }

    /// Same as [`Watchdog::init`].
    pub fn enable(&mut self) {
        self.init();
    }

    /// Signal liveness. Revives an expired watchdog; ignored while disabled.
    pub fn kick(&mut self) {
        if !self.enabled {
            return;
        }
        if self.expired {
            debug!("Watchdog revived by late kick");
        }
        self.expired = false;
        self.last_kick = self.clock.now();
    }

    /// Check for expiry, returning `true` if the watchdog is expired.
    ///
    /// The transition to expired is logged once; later checks keep
    /// returning `true` until the next kick or disable.
    pub fn check(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        if self.expired {
            return true;
        }

        let elapsed = self.elapsed();
        if elapsed >= self.timeout {
            self.expired = true;
            warn!(
                elapsed_secs = elapsed.as_secs_f64(),
                timeout_secs = self.timeout.as_secs_f64(),
                "Watchdog expired"
            );
        }
        self.expired
    }

    /// Stop supervising. Idempotent.
    pub fn disable(&mut self) {
        if self.enabled {
            debug!("Watchdog disabled");
        }
        self.enabled = false;
        self.expired = false;
    }

    /// Time left before the next check would report expiry.
    ///
    /// Zero when disabled or already expired.
    #[must_use]
    pub fn time_remaining(&self) -> Duration {
        if !self.enabled || self.expired {
            return Duration::ZERO;
        }
        self.timeout.saturating_sub(self.elapsed())
    }

    /// Current state.
    #[must_use]
    pub fn status(&self) -> WatchdogStatus {
        match (self.enabled, self.expired) {
            (false, _) => WatchdogStatus::Disabled,
            (true, false) => WatchdogStatus::Armed,
            (true, true) => WatchdogStatus::Expired,
        }
    }

    /// Configured timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The clock this watchdog reads.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn elapsed(&self) -> Duration {
        self.clock.now().saturating_sub(self.last_kick)
    }
}
