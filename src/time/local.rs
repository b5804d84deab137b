//! Local time utilities based on `chrono` and `chrono-tz`.
//!
//! This module provides generic helper functions for converting
//! the current UTC time into local time using IANA timezone names.
//!
//! # Provided Functions
//! - [`today_in_local`]: Returns the current date (`NaiveDate`) in the given timezone.
//! - [`now_in_local`]: Returns the current local time (`DateTime<Tz>`).
//!
//! # Timezone Format
//! - Timezone names must follow the **IANA format**, e.g. `"Asia/Seoul"` or `"Asia/Tokyo"`.
//! - If an invalid name is given, the functions will return an error.

use anyhow::{Result, anyhow};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

/// Returns **today's date** in the specified IANA timezone.
///
/// ## Arguments
/// - `tz_name`: A string such as `"Asia/Seoul"` or `"Asia/Tokyo"`.
///
/// ## Returns
/// - `Ok(NaiveDate)` — Local date in the specified timezone.
/// - `Err` — If the timezone name is invalid.
///
/// ## Example
/// ```
/// use danran_web::time::local::today_in_local;
/// let date = today_in_local("Asia/Seoul").unwrap();
/// println!("Seoul today = {}", date);
/// ```
pub fn today_in_local(tz_name: &str) -> Result<NaiveDate> {
    Ok(now_in_local(tz_name)?.date_naive())
}

/// Returns the **current local time** in the specified timezone.
///
/// ## Example
/// ```
/// use danran_web::time::local::now_in_local;
/// let now_seoul = now_in_local("Asia/Seoul").unwrap();
/// println!("Seoul now = {}", now_seoul);
/// ```
pub fn now_in_local(tz_name: &str) -> Result<DateTime<Tz>> {
    let tz: Tz =
        Tz::from_str(tz_name).map_err(|_| anyhow!("Invalid timezone name: {}", tz_name))?;

    Ok(Utc::now().with_timezone(&tz))
}
