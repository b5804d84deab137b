//! # Database Port (Synchronous)
//!
//! Defines an abstract database interface (`Db`) and supporting types
//! used by adapters such as the MySQL implementation.
//!
//! - [`Param`]: Represents SQL parameters.
//! - [`Value`] / [`Row`]: Generic owned data representations.
//! - [`Db`]: Defines minimal operations (`fetch_one`, `fetch_all`, `exec`, etc.).
//!
//! The value set is intentionally small: ids and counters are unsigned
//! integers, text columns are UTF-8 strings, and the journaling domain only
//! needs `DATE` (activation dates, entry dates) and `DATETIME` (created /
//! updated stamps) on top of that.
//!
//! # Example
//! ```rust,ignore
//! use danran_web::db::port::{Db, Param};
//! use danran_web::params;
//!
//! // Repository example (pseudo-code)
//! let ps = params![42u64, "hello", None::<&str>]; // last is NULL
//! let id = db.exec_returning_last_insert_id(
//!     "INSERT INTO comments (user_id, content, extra) VALUES (?, ?, ?)",
//!     &ps,
//! )?;
//! ```
use std::collections::HashMap;

use anyhow::{Result, bail};
use chrono::{NaiveDate, NaiveDateTime};

/// SQL parameter types passed to a query.
///
/// - `Str(&str)` holds a borrowed string reference.
/// - `Null` represents an SQL NULL.
/// - `Date` maps to a `DATE` column, `DateTime` to `DATETIME` (no time zone).
#[derive(Debug)]
pub enum Param<'a> {
    I64(i64),
    U64(u64),
    Bool(bool),
    Str(&'a str),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Null,
}

/// Generic owned database value used for row mapping.
#[derive(Debug, Clone)]
pub enum Value {
    I64(i64),
    U64(u64),
    Bool(bool),
    Str(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Null,
}

/// Represents a single database row (column name → value map).
#[derive(Debug, Clone, Default)]
pub struct Row {
    cols: HashMap<String, Value>,
}

// ------------------------------
// Param conversions (From impls)
// ------------------------------

impl<'a> From<i64> for Param<'a> {
    fn from(x: i64) -> Self {
        Param::I64(x)
    }
}

impl<'a> From<u64> for Param<'a> {
    fn from(x: u64) -> Self {
        Param::U64(x)
    }
}

impl<'a> From<bool> for Param<'a> {
    fn from(x: bool) -> Self {
        Param::Bool(x)
    }
}

impl<'a> From<&'a str> for Param<'a> {
    fn from(x: &'a str) -> Self {
        Param::Str(x)
    }
}

impl<'a> From<Option<&'a str>> for Param<'a> {
    fn from(x: Option<&'a str>) -> Self {
        match x {
            Some(s) => Param::Str(s),
            None => Param::Null,
        }
    }
}

impl<'a> From<NaiveDate> for Param<'a> {
    fn from(d: NaiveDate) -> Self {
        Param::Date(d)
    }
}

impl<'a> From<Option<NaiveDate>> for Param<'a> {
    fn from(d: Option<NaiveDate>) -> Self {
        match d {
            Some(d) => Param::Date(d),
            None => Param::Null,
        }
    }
}

impl<'a> From<NaiveDateTime> for Param<'a> {
    fn from(dt: NaiveDateTime) -> Self {
        Param::DateTime(dt)
    }
}

impl<'a> From<Option<NaiveDateTime>> for Param<'a> {
    fn from(dt: Option<NaiveDateTime>) -> Self {
        match dt {
            Some(dt) => Param::DateTime(dt),
            None => Param::Null,
        }
    }
}

// ------------------------------------
// params! macro
// ------------------------------------

/// Macro to easily build a `Vec<Param>` for SQL queries.
///
/// # Example
/// ```rust
/// use danran_web::db::port::Param;
/// use danran_web::params;
///
/// let name = "Alice";
/// let age: u64 = 42;
/// let note: Option<&str> = None; // becomes NULL
///
/// let ps = params![age, name, true, note];
/// assert!(matches!(ps[0], Param::U64(42)));
/// assert!(matches!(ps[1], Param::Str("Alice")));
/// assert!(matches!(ps[2], Param::Bool(true)));
/// assert!(matches!(ps[3], Param::Null));
/// ```
#[macro_export]
macro_rules! params {
    ($($x:expr),* $(,)?) => {{
       let mut v = Vec::<Param>::new();
       $( v.push(Param::from($x)); )*
          v
    }};
}

// ------------------------------
// Row helper methods
// ------------------------------

impl Row {
    /// Inserts a new column (used internally by DB adapters).
    pub fn insert(&mut self, key: impl Into<String>, val: Value) {
        self.cols.insert(key.into(), val);
    }

    /// Returns a `u64` (accepts non-negative `i64`).
    pub fn get_u64(&self, key: &str) -> Result<u64> {
        match self.cols.get(key) {
            Some(Value::U64(v)) => Ok(*v),
            Some(Value::I64(v)) if *v >= 0 => Ok(*v as u64),
            _ => bail!("column `{key}` is not U64"),
        }
    }

    /// Returns an optional `u64` (`NULL` → `None`).
    pub fn get_u64_opt(&self, key: &str) -> Result<Option<u64>> {
        match self.cols.get(key) {
            Some(Value::Null) => Ok(None),
            Some(_) => Ok(Some(self.get_u64(key)?)),
            None => bail!("column `{key}` not found"),
        }
    }

    /// Returns an `i64`.
    pub fn get_i64(&self, key: &str) -> Result<i64> {
        match self.cols.get(key) {
            Some(Value::I64(v)) => Ok(*v),
            Some(Value::U64(v)) if *v <= i64::MAX as u64 => Ok(*v as i64),
            _ => bail!("column `{key}` is not I64"),
        }
    }

    /// Returns a `bool`.
    ///
    /// Accepts:
    /// - `Bool` directly
    /// - Numeric values (`I64`, `U64`) where non-zero = `true`
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        match self.cols.get(key) {
            Some(Value::Bool(v)) => Ok(*v),
            Some(Value::I64(v)) => Ok(*v != 0),
            Some(Value::U64(v)) => Ok(*v != 0),
            _ => bail!("column `{key}` is not Bool"),
        }
    }

    /// Returns a `String` (only for `Value::Str`).
    pub fn get_string(&self, key: &str) -> Result<String> {
        match self.cols.get(key) {
            Some(Value::Str(s)) => Ok(s.clone()),
            _ => bail!("column `{key}` is not String"),
        }
    }

    /// Returns an optional `String` (`NULL` → `None`).
    pub fn get_string_opt(&self, key: &str) -> Result<Option<String>> {
        match self.cols.get(key) {
            Some(Value::Str(s)) => Ok(Some(s.clone())),
            Some(Value::Null) => Ok(None),
            Some(_) => bail!("column `{key}` is not String/NULL"),
            None => bail!("column `{key}` not found"),
        }
    }

    /// Returns a [`NaiveDate`].
    ///
    /// MySQL reports `DATE` columns through the same wire type as
    /// `DATETIME`, so a `DateTime` value at midnight is accepted too.
    pub fn get_date(&self, key: &str) -> Result<NaiveDate> {
        match self.cols.get(key) {
            Some(Value::Date(d)) => Ok(*d),
            Some(Value::DateTime(dt)) => Ok(dt.date()),
            _ => bail!("column `{key}` is not Date"),
        }
    }

    /// Returns an optional [`NaiveDate`] (`NULL` → `None`).
    pub fn get_date_opt(&self, key: &str) -> Result<Option<NaiveDate>> {
        match self.cols.get(key) {
            Some(Value::Date(d)) => Ok(Some(*d)),
            Some(Value::DateTime(dt)) => Ok(Some(dt.date())),
            Some(Value::Null) => Ok(None),
            Some(_) => bail!("column `{key}` is not Date/NULL"),
            None => bail!("column `{key}` not found"),
        }
    }

    /// Returns a [`NaiveDateTime`].
    pub fn get_datetime(&self, key: &str) -> Result<NaiveDateTime> {
        match self.cols.get(key) {
            Some(Value::DateTime(dt)) => Ok(*dt),
            _ => bail!("column `{key}` is not DateTime"),
        }
    }

    /// Returns an optional [`NaiveDateTime`] (`NULL` → `None`).
    pub fn get_datetime_opt(&self, key: &str) -> Result<Option<NaiveDateTime>> {
        match self.cols.get(key) {
            Some(Value::DateTime(dt)) => Ok(Some(*dt)),
            Some(Value::Null) => Ok(None),
            Some(_) => bail!("column `{key}` is not DateTime/NULL"),
            None => bail!("column `{key}` not found"),
        }
    }
}

/// Database abstraction (synchronous).
///
/// For async support, define an equivalent trait with `async_trait`.
#[cfg_attr(test, mockall::automock)]
pub trait Db: Send + Sync + 'static {
    fn fetch_one<'a>(&self, sql: &str, params: &[Param<'a>]) -> Result<Option<Row>>;

    fn fetch_all<'a>(&self, sql: &str, params: &[Param<'a>]) -> Result<Vec<Row>>;

    /// Execute a write operation (`INSERT`, `UPDATE`, `DELETE`).
    ///
    /// Returns affected row count.
    fn exec<'a>(&self, sql: &str, params: &[Param<'a>]) -> Result<u64>;

    /// Execute and return `LAST_INSERT_ID()` (for inserts).
    fn exec_returning_last_insert_id<'a>(&self, sql: &str, params: &[Param<'a>]) -> Result<u64>;
}
