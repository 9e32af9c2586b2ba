//! Injectable time source.
//!
//! Every status decision in the lifecycle engine compares calendar dates
//! against "today". Commands take the clock as a value so tests can pin it;
//! production code uses [`SystemClock`].

use chrono::{DateTime, NaiveDate, Utc};

/// A source of "now" and "today" for the lifecycle engine.
pub trait Clock {
    /// Current instant, used for `completedAt` and notification timestamps.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date, used for due/overdue comparisons.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a fixed instant, for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Pin the clock to midnight UTC of the given calendar date.
    ///
    /// # Panics
    ///
    /// Panics if the date has no midnight (cannot happen for valid dates).
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn at_date(date: NaiveDate) -> Self {
        Self(date.and_hms_opt(0, 0, 0).unwrap().and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
