use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Local, NaiveDate, TimeDelta, Utc};

/// Source of "now" and "today"
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar day in the local time zone
    fn today(&self) -> NaiveDate {
        self.now().with_timezone(&Local).date_naive()
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
    today: Rc<Cell<Option<NaiveDate>>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        ManualClock {
            now: Rc::new(Cell::new(now)),
            today: Rc::new(Cell::new(None)),
        }
    }

    /// Pin "today" regardless of the local time zone
    pub fn with_today(self, today: NaiveDate) -> Self {
        self.today.set(Some(today));
        self
    }

    pub fn advance(&self, by: TimeDelta) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    fn today(&self) -> NaiveDate {
        self.today
            .get()
            .unwrap_or_else(|| self.now.get().with_timezone(&Local).date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances_shared_time() {
        let clock = ManualClock::new("2025-01-05T10:00:00Z".parse().unwrap());
        let other = clock.clone();
        clock.advance(TimeDelta::seconds(90));
        assert_eq!(other.now(), "2025-01-05T10:01:30Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn pinned_today() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let clock = ManualClock::new("2025-01-05T23:59:00Z".parse().unwrap()).with_today(today);
        assert_eq!(clock.today(), today);
    }
}
