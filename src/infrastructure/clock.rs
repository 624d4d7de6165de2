//! Wall-clock abstraction.
//!
//! The archival rule and creation timestamps depend on "now". Routing every
//! read through [`Clock`] lets tests pin the date.

use chrono::{DateTime, Local, NaiveDate, Utc};
use parking_lot::Mutex;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// Current instant in the local time zone.
    fn now(&self) -> DateTime<Local>;

    /// Current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Current instant in UTC.
    fn now_utc(&self) -> DateTime<Utc> {
        self.now().with_timezone(&Utc)
    }
}

/// Clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock frozen at a settable instant.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Local};
/// use futurejoy::infrastructure::{Clock, FixedClock};
///
/// let start = Local::now();
/// let clock = FixedClock::new(start);
/// clock.advance(Duration::days(1));
/// assert_eq!(clock.now(), start + Duration::days(1));
/// ```
#[derive(Debug)]
pub struct FixedClock {
    instant: Mutex<DateTime<Local>>,
}

impl FixedClock {
    #[must_use]
    pub fn new(instant: DateTime<Local>) -> Self {
        Self {
            instant: Mutex::new(instant),
        }
    }

    pub fn set(&self, instant: DateTime<Local>) {
        *self.instant.lock() = instant;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut instant = self.instant.lock();
        *instant += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        *self.instant.lock()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> DateTime<Local> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Arc;

    #[test]
    fn fixed_clock_can_be_pinned_to_a_new_instant() {
        let start = Local.with_ymd_and_hms(2026, 10, 18, 23, 30, 0).unwrap();
        let clock = Arc::new(FixedClock::new(start));
        let shared: Arc<dyn Clock> = clock.clone();

        clock.set(Local.with_ymd_and_hms(2027, 1, 1, 0, 15, 0).unwrap());

        assert_eq!(shared.today(), NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());
        assert_eq!(shared.now_utc(), shared.now().with_timezone(&Utc));
    }
}
