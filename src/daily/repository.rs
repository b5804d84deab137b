//! MySQL-backed stores for journal entries, comments, and likes.
//!
//! Tables:
//! - `dailies` (`daily_id`, `user_id`, `group_id`, `entry_date`, `content`,
//!   `created_at`, `updated_at` NULL)
//! - `comments` (`comment_id`, `daily_id`, `user_id`, `content`,
//!   `created_at`, `updated_at` NULL)
//! - `daily_likes` (`like_id`, `daily_id`, `user_id`, `created_at`;
//!   UNIQUE (`daily_id`, `user_id`))

use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};

use crate::daily::domain::{Comment, Daily, NewComment, NewDaily};
use crate::daily::store::{CommentStore, DailyStore, LikeStore};
use crate::db::port::{Db, Param, Row};
use crate::params;

const DAILY_COLS: &str =
    "daily_id, user_id, group_id, entry_date, content, created_at, updated_at";

fn daily_from_row(row: &Row) -> Result<Daily> {
    Ok(Daily {
        id: row.get_u64("daily_id")?,
        user_id: row.get_u64("user_id")?,
        group_id: row.get_u64("group_id")?,
        date: row.get_date("entry_date")?,
        content: row.get_string("content")?,
        created_at: row.get_datetime("created_at")?,
        updated_at: row.get_datetime_opt("updated_at")?,
    })
}

pub struct MySqlDailyStore {
    db: Arc<dyn Db>,
}

impl MySqlDailyStore {
    pub fn new(db: Arc<dyn Db>) -> Self {
        Self { db }
    }
}

impl DailyStore for MySqlDailyStore {
    fn find_by_id(&self, id: u64) -> Result<Option<Daily>> {
        let sql = format!("SELECT {DAILY_COLS} FROM dailies WHERE daily_id = ?");
        let row = self.db.fetch_one(&sql, &params![id])?;
        row.as_ref().map(daily_from_row).transpose()
    }

    fn insert(&self, new: &NewDaily) -> Result<u64> {
        self.db.exec_returning_last_insert_id(
            "INSERT INTO dailies (user_id, group_id, entry_date, content, created_at) \
             VALUES (?, ?, ?, ?, ?)",
            &params![
                new.user_id,
                new.group_id,
                new.date,
                new.content.as_str(),
                new.created_at
            ],
        )
    }

    fn update_content(&self, id: u64, content: &str, updated_at: NaiveDateTime) -> Result<()> {
        self.db.exec(
            "UPDATE dailies SET content = ?, updated_at = ? WHERE daily_id = ?",
            &params![content, updated_at, id],
        )?;
        Ok(())
    }

    fn delete(&self, id: u64) -> Result<()> {
        self.db
            .exec("DELETE FROM dailies WHERE daily_id = ?", &params![id])?;
        Ok(())
    }

    fn find_all_by_group_between(
        &self,
        group_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Daily>> {
        let sql = format!(
            "SELECT {DAILY_COLS} FROM dailies \
             WHERE group_id = ? AND entry_date BETWEEN ? AND ? \
             ORDER BY entry_date, daily_id"
        );
        let rows = self.db.fetch_all(&sql, &params![group_id, start, end])?;
        rows.iter().map(daily_from_row).collect()
    }
}

const COMMENT_COLS: &str = "comment_id, daily_id, user_id, content, created_at, updated_at";

fn comment_from_row(row: &Row) -> Result<Comment> {
    Ok(Comment {
        id: row.get_u64("comment_id")?,
        daily_id: row.get_u64("daily_id")?,
        user_id: row.get_u64("user_id")?,
        content: row.get_string("content")?,
        created_at: row.get_datetime("created_at")?,
        updated_at: row.get_datetime_opt("updated_at")?,
    })
}

pub struct MySqlCommentStore {
    db: Arc<dyn Db>,
}

impl MySqlCommentStore {
    pub fn new(db: Arc<dyn Db>) -> Self {
        Self { db }
    }
}

impl CommentStore for MySqlCommentStore {
    fn find_by_id(&self, id: u64) -> Result<Option<Comment>> {
        let sql = format!("SELECT {COMMENT_COLS} FROM comments WHERE comment_id = ?");
        let row = self.db.fetch_one(&sql, &params![id])?;
        row.as_ref().map(comment_from_row).transpose()
    }

    fn find_all_by_daily(&self, daily_id: u64) -> Result<Vec<Comment>> {
        let sql =
            format!("SELECT {COMMENT_COLS} FROM comments WHERE daily_id = ? ORDER BY comment_id");
        let rows = self.db.fetch_all(&sql, &params![daily_id])?;
        rows.iter().map(comment_from_row).collect()
    }

    fn count_by_daily(&self, daily_id: u64) -> Result<u64> {
        let row = self.db.fetch_one(
            "SELECT COUNT(*) AS cnt FROM comments WHERE daily_id = ?",
            &params![daily_id],
        )?;
        row.map(|r| r.get_u64("cnt")).transpose().map(Option::unwrap_or_default)
    }

    fn insert(&self, new: &NewComment) -> Result<u64> {
        self.db.exec_returning_last_insert_id(
            "INSERT INTO comments (daily_id, user_id, content, created_at) VALUES (?, ?, ?, ?)",
            &params![
                new.daily_id,
                new.user_id,
                new.content.as_str(),
                new.created_at
            ],
        )
    }

    fn update_content(&self, id: u64, content: &str, updated_at: NaiveDateTime) -> Result<()> {
        self.db.exec(
            "UPDATE comments SET content = ?, updated_at = ? WHERE comment_id = ?",
            &params![content, updated_at, id],
        )?;
        Ok(())
    }

    fn delete(&self, id: u64) -> Result<()> {
        self.db
            .exec("DELETE FROM comments WHERE comment_id = ?", &params![id])?;
        Ok(())
    }

    fn delete_all_by_daily(&self, daily_id: u64) -> Result<()> {
        self.db.exec(
            "DELETE FROM comments WHERE daily_id = ?",
            &params![daily_id],
        )?;
        Ok(())
    }
}

pub struct MySqlLikeStore {
    db: Arc<dyn Db>,
}

impl MySqlLikeStore {
    pub fn new(db: Arc<dyn Db>) -> Self {
        Self { db }
    }
}

impl LikeStore for MySqlLikeStore {
    fn exists(&self, daily_id: u64, user_id: u64) -> Result<bool> {
        let row = self.db.fetch_one(
            "SELECT like_id FROM daily_likes WHERE daily_id = ? AND user_id = ?",
            &params![daily_id, user_id],
        )?;
        Ok(row.is_some())
    }

    fn count_by_daily(&self, daily_id: u64) -> Result<u64> {
        let row = self.db.fetch_one(
            "SELECT COUNT(*) AS cnt FROM daily_likes WHERE daily_id = ?",
            &params![daily_id],
        )?;
        row.map(|r| r.get_u64("cnt")).transpose().map(Option::unwrap_or_default)
    }

    fn insert(&self, daily_id: u64, user_id: u64, created_at: NaiveDateTime) -> Result<()> {
        self.db.exec(
            "INSERT INTO daily_likes (daily_id, user_id, created_at) VALUES (?, ?, ?)",
            &params![daily_id, user_id, created_at],
        )?;
        Ok(())
    }

    fn delete(&self, daily_id: u64, user_id: u64) -> Result<()> {
        self.db.exec(
            "DELETE FROM daily_likes WHERE daily_id = ? AND user_id = ?",
            &params![daily_id, user_id],
        )?;
        Ok(())
    }

    fn delete_all_by_daily(&self, daily_id: u64) -> Result<()> {
        self.db.exec(
            "DELETE FROM daily_likes WHERE daily_id = ?",
            &params![daily_id],
        )?;
        Ok(())
    }
}
