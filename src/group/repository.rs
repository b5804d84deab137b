//! MySQL-backed stores for family groups and join requests.
//!
//! Tables:
//! - `family_groups` (`family_group_id`, `name`, `invite_code` UNIQUE,
//!   `admin_user_id`, `created_at`, `updated_at` NULL)
//! - `join_requests` (`request_id`, `group_id`, `user_id`, `invite_code`,
//!   `status`, `created_at`, `updated_at` NULL)

use std::sync::Arc;

use anyhow::{Result, anyhow};

use crate::db::port::{Db, Param, Row};
use crate::group::domain::{FamilyGroup, JoinRequest, JoinStatus, NewFamilyGroup, NewJoinRequest};
use crate::group::store::{GroupStore, JoinRequestStore};
use crate::params;

const GROUP_COLS: &str =
    "family_group_id, name, invite_code, admin_user_id, created_at, updated_at";

fn group_from_row(row: &Row) -> Result<FamilyGroup> {
    Ok(FamilyGroup {
        id: row.get_u64("family_group_id")?,
        name: row.get_string("name")?,
        invite_code: row.get_string("invite_code")?,
        admin_user_id: row.get_u64("admin_user_id")?,
        created_at: row.get_datetime("created_at")?,
        updated_at: row.get_datetime_opt("updated_at")?,
    })
}

pub struct MySqlGroupStore {
    db: Arc<dyn Db>,
}

impl MySqlGroupStore {
    pub fn new(db: Arc<dyn Db>) -> Self {
        Self { db }
    }
}

impl GroupStore for MySqlGroupStore {
    fn find_by_id(&self, id: u64) -> Result<Option<FamilyGroup>> {
        let sql = format!("SELECT {GROUP_COLS} FROM family_groups WHERE family_group_id = ?");
        let row = self.db.fetch_one(&sql, &params![id])?;
        row.as_ref().map(group_from_row).transpose()
    }

    fn find_by_invite_code(&self, code: &str) -> Result<Option<FamilyGroup>> {
        let sql = format!("SELECT {GROUP_COLS} FROM family_groups WHERE invite_code = ?");
        let row = self.db.fetch_one(&sql, &params![code])?;
        row.as_ref().map(group_from_row).transpose()
    }

    fn find_by_admin(&self, admin_user_id: u64) -> Result<Option<FamilyGroup>> {
        let sql = format!("SELECT {GROUP_COLS} FROM family_groups WHERE admin_user_id = ?");
        let row = self.db.fetch_one(&sql, &params![admin_user_id])?;
        row.as_ref().map(group_from_row).transpose()
    }

    fn insert(&self, new: &NewFamilyGroup) -> Result<u64> {
        self.db.exec_returning_last_insert_id(
            "INSERT INTO family_groups (name, invite_code, admin_user_id, created_at) \
             VALUES (?, ?, ?, ?)",
            &params![
                new.name.as_str(),
                new.invite_code.as_str(),
                new.admin_user_id,
                new.created_at
            ],
        )
    }

    fn update_name(&self, id: u64, name: &str) -> Result<()> {
        self.db.exec(
            "UPDATE family_groups SET name = ?, updated_at = NOW() WHERE family_group_id = ?",
            &params![name, id],
        )?;
        Ok(())
    }
}

const REQUEST_COLS: &str =
    "request_id, group_id, user_id, invite_code, status, created_at, updated_at";

fn request_from_row(row: &Row) -> Result<JoinRequest> {
    let status_raw = row.get_string("status")?;
    Ok(JoinRequest {
        id: row.get_u64("request_id")?,
        group_id: row.get_u64("group_id")?,
        user_id: row.get_u64("user_id")?,
        invite_code: row.get_string("invite_code")?,
        status: JoinStatus::parse(&status_raw)
            .ok_or_else(|| anyhow!("unknown join status `{status_raw}`"))?,
        created_at: row.get_datetime("created_at")?,
        updated_at: row.get_datetime_opt("updated_at")?,
    })
}

pub struct MySqlJoinRequestStore {
    db: Arc<dyn Db>,
}

impl MySqlJoinRequestStore {
    pub fn new(db: Arc<dyn Db>) -> Self {
        Self { db }
    }
}

impl JoinRequestStore for MySqlJoinRequestStore {
    fn find_by_id(&self, id: u64) -> Result<Option<JoinRequest>> {
        let sql = format!("SELECT {REQUEST_COLS} FROM join_requests WHERE request_id = ?");
        let row = self.db.fetch_one(&sql, &params![id])?;
        row.as_ref().map(request_from_row).transpose()
    }

    fn find_by_user(&self, user_id: u64) -> Result<Option<JoinRequest>> {
        let sql = format!(
            "SELECT {REQUEST_COLS} FROM join_requests WHERE user_id = ? \
             ORDER BY request_id DESC LIMIT 1"
        );
        let row = self.db.fetch_one(&sql, &params![user_id])?;
        row.as_ref().map(request_from_row).transpose()
    }

    fn find_all_by_group(&self, group_id: u64) -> Result<Vec<JoinRequest>> {
        let sql =
            format!("SELECT {REQUEST_COLS} FROM join_requests WHERE group_id = ? ORDER BY request_id");
        let rows = self.db.fetch_all(&sql, &params![group_id])?;
        rows.iter().map(request_from_row).collect()
    }

    fn insert(&self, new: &NewJoinRequest) -> Result<u64> {
        self.db.exec_returning_last_insert_id(
            "INSERT INTO join_requests (group_id, user_id, invite_code, status, created_at) \
             VALUES (?, ?, ?, 'PENDING', ?)",
            &params![
                new.group_id,
                new.user_id,
                new.invite_code.as_str(),
                new.created_at
            ],
        )
    }

    fn set_status(&self, id: u64, status: JoinStatus) -> Result<()> {
        self.db.exec(
            "UPDATE join_requests SET status = ?, updated_at = NOW() WHERE request_id = ?",
            &params![status.as_str(), id],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::port::Value;
    use chrono::NaiveDate;

    #[test]
    fn request_row_parses_status() {
        let mut row = Row::default();
        row.insert("request_id", Value::U64(5));
        row.insert("group_id", Value::U64(10));
        row.insert("user_id", Value::U64(2));
        row.insert("invite_code", Value::Str("ABCD1234".into()));
        row.insert("status", Value::Str("PENDING".into()));
        row.insert(
            "created_at",
            Value::DateTime(
                NaiveDate::from_ymd_opt(2024, 6, 1)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap(),
            ),
        );
        row.insert("updated_at", Value::Null);

        let req = request_from_row(&row).unwrap();
        assert_eq!(req.status, JoinStatus::Pending);
        assert_eq!(req.updated_at, None);

        row.insert("status", Value::Str("???".into()));
        assert!(request_from_row(&row).is_err());
    }
}
