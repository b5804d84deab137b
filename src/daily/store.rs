//! Persistence ports for journal entries, comments, and likes.
//!
//! Like and comment counts are derived with count queries instead of
//! counter columns, so deletes cannot drift out of sync.

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};

use crate::daily::domain::{Comment, Daily, NewComment, NewDaily};

#[cfg_attr(test, mockall::automock)]
pub trait DailyStore: Send + Sync + 'static {
    fn find_by_id(&self, id: u64) -> Result<Option<Daily>>;

    /// Inserts a new entry and returns its id.
    fn insert(&self, new: &NewDaily) -> Result<u64>;

    fn update_content(&self, id: u64, content: &str, updated_at: NaiveDateTime) -> Result<()>;

    fn delete(&self, id: u64) -> Result<()>;

    /// Entries of a group with `start <= date <= end`, oldest first.
    fn find_all_by_group_between(
        &self,
        group_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Daily>>;
}

#[cfg_attr(test, mockall::automock)]
pub trait CommentStore: Send + Sync + 'static {
    fn find_by_id(&self, id: u64) -> Result<Option<Comment>>;

    fn find_all_by_daily(&self, daily_id: u64) -> Result<Vec<Comment>>;

    fn count_by_daily(&self, daily_id: u64) -> Result<u64>;

    /// Inserts a new comment and returns its id.
    fn insert(&self, new: &NewComment) -> Result<u64>;

    fn update_content(&self, id: u64, content: &str, updated_at: NaiveDateTime) -> Result<()>;

    fn delete(&self, id: u64) -> Result<()>;

    fn delete_all_by_daily(&self, daily_id: u64) -> Result<()>;
}

#[cfg_attr(test, mockall::automock)]
pub trait LikeStore: Send + Sync + 'static {
    fn exists(&self, daily_id: u64, user_id: u64) -> Result<bool>;

    fn count_by_daily(&self, daily_id: u64) -> Result<u64>;

    fn insert(&self, daily_id: u64, user_id: u64, created_at: NaiveDateTime) -> Result<()>;

    fn delete(&self, daily_id: u64, user_id: u64) -> Result<()>;

    fn delete_all_by_daily(&self, daily_id: u64) -> Result<()>;
}
