//! The "logical day" used by the shared daily question.
//!
//! The app treats early-morning activity as belonging to the previous
//! calendar day: a timestamp between midnight and 05:00 local counts as
//! the day before. The question activation job fires at the same 05:00
//! boundary, so the active question and the logical day always agree.
//!
//! The logical date is derived on every call and never persisted.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::time::clock::Clock;

/// Hour (local time) at which one logical day rolls over into the next.
pub const ROLLOVER_HOUR: u32 = 5;

/// The rollover instant as a time of day (05:00:00).
pub fn rollover_time() -> NaiveTime {
    NaiveTime::from_hms_opt(ROLLOVER_HOUR, 0, 0).expect("valid rollover time")
}

/// Returns the logical date for an arbitrary local timestamp.
///
/// Timestamps strictly before 05:00 map to the previous calendar day;
/// 05:00:00 itself belongs to the current day.
pub fn logical_date_of(at: NaiveDateTime) -> NaiveDate {
    if at.time() < rollover_time() {
        at.date()
            .checked_sub_days(Days::new(1))
            .expect("date out of range")
    } else {
        at.date()
    }
}

/// Returns the current logical date as seen through the given [`Clock`].
pub fn logical_today(clock: &dyn Clock) -> NaiveDate {
    logical_date_of(clock.now())
}
