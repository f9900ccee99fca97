//! The source of the current time for the exchange rate cache.

use std::fmt::Debug;

use time::OffsetDateTime;

/// Tells the current time.
pub trait Clock: Debug + Send + Sync {
    /// The current date and time.
    fn now(&self) -> OffsetDateTime;
}

/// A [Clock] that reads the system time in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
