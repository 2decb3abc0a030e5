//! Clock capability for time-dependent logic
//!
//! Best-hour estimation, id synthesis and brief generation all read the
//! current time. Injecting the clock keeps those paths reproducible in tests
//! instead of reaching for ambient wall-clock time.

use chrono::{DateTime, Timelike, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current hour of day (0-23).
    fn current_hour(&self) -> u8 {
        self.now().hour() as u8
    }
}

/// Wall-clock time. The default for binaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a fixed instant, for reproducible tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
