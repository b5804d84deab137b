use chrono::{NaiveDate, NaiveDateTime};

use crate::time::clock::Clock;
use crate::time::local::{now_in_local, today_in_local};

/// A [`Clock`] implementation backed by the system clock.
///
/// # Overview
/// `SystemClock` provides the current date and time based on the operating
/// system's clock and a configured IANA timezone.
///
/// Internally, it delegates timezone handling and conversion to
/// [`today_in_local`] and [`now_in_local`].
///
/// # Design Notes
/// - The timezone is fixed at construction time.
/// - Any invalid timezone should be considered a **configuration error**.
/// - Therefore, this implementation is allowed to panic if the timezone
///   is invalid.
///
/// # Responsibility
/// - Selecting the timezone is the responsibility of the **composition root**
///   (e.g. `main.rs`).
/// - Application and domain logic should treat `Clock` as a trusted source.
pub struct SystemClock {
    tz_name: String,
}

impl SystemClock {
    /// Creates a new [`SystemClock`] with the given IANA timezone name.
    ///
    /// # Arguments
    /// - `tz_name`: An IANA timezone name such as `"Asia/Seoul"`
    ///   or `"Asia/Tokyo"`.
    ///
    /// # Panics
    /// This constructor itself does not panic, but [`Clock::today`] and
    /// [`Clock::now`] will panic if the provided timezone name is invalid.
    pub fn new(tz_name: impl Into<String>) -> Self {
        Self {
            tz_name: tz_name.into(),
        }
    }
}

impl Clock for SystemClock {
    /// Returns today's date in the configured timezone.
    ///
    /// # Panics
    /// Panics if the timezone name is invalid.
    /// This is intentional, as an invalid timezone represents a
    /// misconfiguration rather than a recoverable runtime error.
    fn today(&self) -> NaiveDate {
        today_in_local(&self.tz_name).expect("Invalid timezone for SystemClock")
    }

    /// Returns the current wall-clock time in the configured timezone.
    ///
    /// # Panics
    /// Panics if the timezone name is invalid, for the same reason as
    /// [`Clock::today`].
    fn now(&self) -> NaiveDateTime {
        now_in_local(&self.tz_name)
            .expect("Invalid timezone for SystemClock")
            .naive_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn system_clock_returns_a_date_for_valid_timezone() {
        let clock = SystemClock::new("Asia/Seoul");

        let today = clock.today();

        // Basic sanity checks:
        // - Year must be reasonable
        // - Month and day must be valid ranges
        assert!(today.year() >= 2000);
        assert!((1..=12).contains(&today.month()));
        assert!((1..=31).contains(&today.day()));
    }

    #[test]
    fn now_and_today_share_a_date() {
        let clock = SystemClock::new("Asia/Seoul");

        // `now` may tick over midnight between the two calls; retry once.
        let first = clock.now().date();
        let today = clock.today();
        assert!(today == first || today == clock.now().date());
    }

    #[test]
    #[should_panic(expected = "Invalid timezone for SystemClock")]
    fn system_clock_panics_for_invalid_timezone() {
        let clock = SystemClock::new("Invalid/Timezone");

        let _ = clock.today();
    }
}
