use chrono::{NaiveDate, NaiveDateTime};

use crate::time::clock::Clock;

/// A [`Clock`] implementation that always returns the same instant.
///
/// Useful for deterministic tests and for tools that replay a past day
/// (e.g. backfilling an activation run). The instant is fixed at
/// construction and never advances.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedClock {
    at: NaiveDateTime,
}

impl FixedClock {
    /// Creates a clock frozen at the given local instant.
    pub fn new(at: NaiveDateTime) -> Self {
        Self { at }
    }

    /// Convenience constructor from date and time components.
    ///
    /// # Panics
    /// Panics if the components do not form a valid date or time. Intended
    /// for test setup where the inputs are literals.
    pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Self {
        let at = NaiveDate::from_ymd_opt(year, month, day)
            .expect("invalid date for FixedClock")
            .and_hms_opt(hour, min, sec)
            .expect("invalid time for FixedClock");
        Self { at }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.at.date()
    }

    fn now(&self) -> NaiveDateTime {
        self.at
    }
}
