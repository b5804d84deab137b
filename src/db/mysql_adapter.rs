//! # MySQL Database Adapter
//!
//! An implementation of the [`Db`] port using the [`mysql`] driver crate.
//! It provides MySQL-specific conversions and query execution helpers for the
//! application's infrastructure layer.
//!
//! ## Responsibilities
//! - Convert generic [`Param`] values into [`mysql::Value`]
//! - Convert [`mysql::Row`] into a generic [`Row`]
//! - Implement `fetch_one`, `fetch_all`, `exec`, and
//!   `exec_returning_last_insert_id` using `mysql::Pool`
//!
//! ## Testing Policy
//! - Unit tests focus only on pure conversion functions
//!   (`to_mysql_value` / `to_mysql_params`).
//! - Integration tests against a real MySQL instance should verify
//!   `row_from_mysql` and query execution.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use mysql::{Error as MyError, Params, Pool, Value as My, prelude::*};
use tracing::{debug, error};

use crate::db::port::{Db, Param, Row as GRow, Value};

fn mysql_err_summary(e: &MyError) -> String {
    match e {
        MyError::MySqlError(me) => format!(
            "code={}, state={}, message={}",
            me.code, me.state, me.message
        ),
        other => format!("{other:?}"),
    }
}

/// MySQL implementation of the [`Db`] port.
///
/// - Wraps a connection pool (`mysql::Pool`) for query execution.
/// - Propagates errors as [`anyhow::Error`].
#[derive(Clone)]
pub struct MySqlDb {
    pool: Arc<Pool>,
}

impl MySqlDb {
    /// Creates a new adapter instance using the provided connection pool.
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    /// Converts a single [`Param`] into a [`mysql::Value`].
    ///
    /// Mapping conventions:
    /// - `Bool(true)` → `Int(1)` / `Bool(false)` → `Int(0)`
    /// - `Str` → `Bytes`
    /// - `Date` → `Value::Date` with a zero time component
    /// - `DateTime` → `Value::Date` (Y, M, D, H, M, S, μs)
    /// - `Null` → `NULL`
    #[inline]
    fn to_mysql_value(p: &Param) -> My {
        match p {
            Param::I64(x) => My::Int(*x),
            Param::U64(x) => My::UInt(*x),
            Param::Bool(b) => My::Int(if *b { 1 } else { 0 }),
            Param::Str(s) => My::Bytes(s.as_bytes().to_vec()),
            Param::Date(d) => My::Date(d.year() as u16, d.month() as u8, d.day() as u8, 0, 0, 0, 0),
            Param::DateTime(dt) => {
                let d = dt.date();
                let t = dt.time();
                My::Date(
                    d.year() as u16,
                    d.month() as u8,
                    d.day() as u8,
                    t.hour() as u8,
                    t.minute() as u8,
                    t.second() as u8,
                    t.nanosecond() / 1_000, // μs
                )
            }
            Param::Null => My::NULL,
        }
    }

    /// Converts a slice of [`Param`] into a positional [`Params`].
    #[inline]
    fn to_mysql_params(params_in: &[Param]) -> Params {
        let v: Vec<My> = params_in.iter().map(Self::to_mysql_value).collect();
        Params::Positional(v)
    }

    /// Converts a [`mysql::Row`] into a generic [`Row`].
    ///
    /// `DATE` and `DATETIME` columns share the driver's `Date` wire value, so
    /// both surface as [`Value::DateTime`]; `Row::get_date` narrows as needed.
    /// Types outside the port's value set are stringified.
    fn row_from_mysql(mut r: mysql::Row) -> GRow {
        // Column names are copied first to avoid borrowing conflicts.
        let names: Vec<String> = r
            .columns_ref()
            .iter()
            .map(|c| c.name_str().to_string())
            .collect();

        let mut out = GRow::default();
        for (idx, name) in names.into_iter().enumerate() {
            let v = r
                .take_opt::<My, _>(idx)
                .unwrap_or(Ok(My::NULL))
                .unwrap_or(My::NULL);

            let vv = match v {
                My::NULL => Value::Null,
                My::Int(i) => Value::I64(i),
                My::UInt(u) => Value::U64(u),

                // BLOB/TEXT and friends
                My::Bytes(b) => match String::from_utf8(b) {
                    Ok(s) => Value::Str(s),
                    Err(e) => Value::Str(String::from_utf8_lossy(e.as_bytes()).into_owned()),
                },

                My::Date(y, m, d, hh, mm, ss, _micro) => {
                    let date = NaiveDate::from_ymd_opt(y as i32, m as u32, d as u32)
                        .unwrap_or_else(|| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
                    let time = NaiveTime::from_hms_opt(hh as u32, mm as u32, ss as u32)
                        .unwrap_or_else(|| NaiveTime::from_hms_opt(0, 0, 0).unwrap());
                    Value::DateTime(NaiveDateTime::new(date, time))
                }

                other => Value::Str(format!("{other:?}")),
            };

            out.insert(name, vv);
        }
        out
    }
}

impl Db for MySqlDb {
    fn fetch_one(&self, sql: &str, params_in: &[Param]) -> Result<Option<GRow>> {
        let params = Self::to_mysql_params(params_in);
        let mut conn = self.pool.get_conn().context("get_conn failed")?;

        debug!(sql, params = ?params_in, "fetch_one");

        let res: std::result::Result<Option<mysql::Row>, MyError> = conn.exec_first(sql, params);
        if let Err(ref e) = res {
            error!(sql, "exec_first failed: {}", mysql_err_summary(e));
        }
        let row_opt = res.context("exec_first failed")?;

        Ok(row_opt.map(Self::row_from_mysql))
    }

    fn fetch_all(&self, sql: &str, params_in: &[Param]) -> Result<Vec<GRow>> {
        let params = Self::to_mysql_params(params_in);
        let mut conn = self.pool.get_conn().context("get_conn failed")?;

        debug!(sql, params = ?params_in, "fetch_all");

        let res: std::result::Result<Vec<mysql::Row>, MyError> = conn.exec(sql, params);
        if let Err(ref e) = res {
            error!(sql, "exec failed: {}", mysql_err_summary(e));
        }
        let rows = res.context("exec (fetch_all) failed")?;

        Ok(rows.into_iter().map(Self::row_from_mysql).collect())
    }

    fn exec(&self, sql: &str, params_in: &[Param]) -> Result<u64> {
        let params = Self::to_mysql_params(params_in);
        let mut conn = self.pool.get_conn().context("get_conn failed")?;

        debug!(sql, params = ?params_in, "exec");

        let res: std::result::Result<(), MyError> = conn.exec_drop(sql, params);
        if let Err(ref e) = res {
            error!(sql, "exec_drop failed: {}", mysql_err_summary(e));
        }
        res.context("exec_drop failed")?;

        Ok(conn.affected_rows())
    }

    fn exec_returning_last_insert_id(&self, sql: &str, params_in: &[Param]) -> Result<u64> {
        let params = Self::to_mysql_params(params_in);
        let mut conn = self.pool.get_conn().context("get_conn failed")?;

        debug!(sql, params = ?params_in, "exec (returning id)");

        let res: std::result::Result<(), MyError> = conn.exec_drop(sql, params);
        if let Err(ref e) = res {
            error!(sql, "exec_drop failed: {}", mysql_err_summary(e));
        }
        res.context("exec_drop failed")?;

        let id: Option<u64> = conn
            .query_first("SELECT LAST_INSERT_ID()")
            .context("query_first(LAST_INSERT_ID()) failed")?;
        id.ok_or_else(|| anyhow::anyhow!("LAST_INSERT_ID() returned NULL"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    /// Verifies primitive `Param` → `mysql::Value` conversions.
    #[test]
    fn to_mysql_value_maps_primitive_params() {
        match MySqlDb::to_mysql_value(&Param::I64(-7)) {
            My::Int(v) => assert_eq!(v, -7),
            other => panic!("expected Int, got {other:?}"),
        }

        match MySqlDb::to_mysql_value(&Param::U64(9)) {
            My::UInt(v) => assert_eq!(v, 9),
            other => panic!("expected UInt, got {other:?}"),
        }

        match MySqlDb::to_mysql_value(&Param::Bool(true)) {
            My::Int(v) => assert_eq!(v, 1),
            other => panic!("expected Int(1), got {other:?}"),
        }
        match MySqlDb::to_mysql_value(&Param::Bool(false)) {
            My::Int(v) => assert_eq!(v, 0),
            other => panic!("expected Int(0), got {other:?}"),
        }

        match MySqlDb::to_mysql_value(&Param::Str("abc")) {
            My::Bytes(b) => assert_eq!(b, b"abc"),
            other => panic!("expected Bytes(\"abc\"), got {other:?}"),
        }

        match MySqlDb::to_mysql_value(&Param::Null) {
            My::NULL => {}
            other => panic!("expected NULL, got {other:?}"),
        }
    }

    /// Checks Date → `My::Date` conversion (zero time component).
    #[test]
    fn to_mysql_value_maps_date() {
        let d = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        match MySqlDb::to_mysql_value(&Param::Date(d)) {
            My::Date(y, m, day, hh, mm, ss, micro) => {
                assert_eq!((y, m, day), (2024, 6, 1));
                assert_eq!((hh, mm, ss, micro), (0, 0, 0, 0));
            }
            other => panic!("expected Date, got {other:?}"),
        }
    }

    /// Checks DateTime → `My::Date` conversion.
    #[test]
    fn to_mysql_value_maps_datetime() {
        let dt = NaiveDate::from_ymd_opt(2025, 8, 28)
            .unwrap()
            .and_hms_micro_opt(15, 12, 34, 987_654)
            .unwrap();
        match MySqlDb::to_mysql_value(&Param::DateTime(dt)) {
            My::Date(y, m, d, hh, mm, ss, micro) => {
                assert_eq!((y, m, d), (2025, 8, 28));
                assert_eq!((hh, mm, ss), (15, 12, 34));
                assert_eq!(micro, 987_654);
            }
            other => panic!("expected Date, got {other:?}"),
        }
    }

    /// Ensures `to_mysql_params` preserves order and uses positional parameters.
    #[test]
    fn to_mysql_params_is_positional_and_ordered() {
        let d = NaiveDate::from_ymd_opt(1970, 1, 2).unwrap();
        let ps = [
            Param::U64(1),
            Param::Str("x"),
            Param::Date(d),
            Param::Null,
        ];

        let params = MySqlDb::to_mysql_params(&ps);
        match params {
            Params::Positional(v) => {
                assert_eq!(v.len(), 4);
                assert!(matches!(v[0], My::UInt(1)));
                assert!(matches!(v[1], My::Bytes(_)));
                assert!(matches!(v[2], My::Date(1970, 1, 2, 0, 0, 0, 0)));
                assert!(matches!(v[3], My::NULL));
            }
            _ => panic!("expected Params::Positional"),
        }
    }
}
