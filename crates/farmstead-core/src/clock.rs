//! Time sources for snapshot evaluation.
//!
//! The computation core takes the current time as a plain Unix timestamp.
//! The poller asks a [`Clock`] for it once per frame, so every tile in a
//! snapshot is evaluated at the same instant.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// A source of the current Unix time in seconds.
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch.
    fn now(&self) -> i64;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// A manually driven clock for tests and replays.
#[derive(Debug, Default)]
pub struct FixedClock {
    now: AtomicI64,
}

impl FixedClock {
    /// A clock stopped at `now`.
    pub const fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    /// Move the clock to `now`.
    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::Release);
    }

    /// Move the clock forward by `seconds`, saturating at `i64::MAX`.
    pub fn advance(&self, seconds: i64) {
        let current = self.now.load(Ordering::Acquire);
        self.now.store(current.saturating_add(seconds), Ordering::Release);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::Acquire)
    }
}
