use chrono::{NaiveDate, NaiveDateTime};

/// A port that provides the **current date and time** for the application.
///
/// # Purpose
/// This trait abstracts access to "now" so that:
///
/// - Application and domain logic do **not** depend on system time
/// - Implementations can be swapped (system clock, fixed clock, mock, etc.)
/// - Tests can be deterministic and time-independent
///
/// # Design Notes
/// - The timezone concept is intentionally delegated to the implementation.
///   Callers receive wall-clock values that are already local.
/// - Both the question activation job and the logical-day window checks read
///   the same `Clock` instance, so "today" is a single source of truth.
/// - This trait represents an **external capability**, similar to a
///   Repository or Mailer.
///
/// # Typical Implementations
/// - `SystemClock`: Uses the OS / runtime clock with a configured timezone
/// - `FixedClock`: Returns a constant instant (for testing)
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    /// Returns today's date as a [`NaiveDate`].
    fn today(&self) -> NaiveDate;

    /// Returns the current local wall-clock time as a [`NaiveDateTime`].
    ///
    /// The date component of `now()` must agree with [`Clock::today`].
    fn now(&self) -> NaiveDateTime;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_clock::FixedClock;
    use chrono::NaiveDate;

    #[test]
    fn fixed_clock_returns_given_instant() {
        let at = NaiveDate::from_ymd_opt(2025, 10, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let clock = FixedClock::new(at);

        assert_eq!(clock.today(), at.date());
        assert_eq!(clock.now(), at);
    }

    #[test]
    fn clock_trait_object_works() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let clock: Box<dyn Clock> = Box::new(FixedClock::new(at));

        assert_eq!(clock.today(), at.date());
    }
}
