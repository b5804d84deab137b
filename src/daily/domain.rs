use chrono::{NaiveDate, NaiveDateTime};

/// A journal entry, visible to the author's family group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Daily {
    pub id: u64,
    pub user_id: u64,
    pub group_id: u64,
    pub date: NaiveDate,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl Daily {
    pub fn is_owned_by(&self, user_id: u64) -> bool {
        self.user_id == user_id
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewDaily {
    pub user_id: u64,
    pub group_id: u64,
    pub date: NaiveDate,
    pub content: String,
    pub created_at: NaiveDateTime,
}

/// A comment on a journal entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub id: u64,
    pub daily_id: u64,
    pub user_id: u64,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl Comment {
    pub fn is_owned_by(&self, user_id: u64) -> bool {
        self.user_id == user_id
    }

    pub fn belongs_to(&self, daily_id: u64) -> bool {
        self.daily_id == daily_id
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewComment {
    pub daily_id: u64,
    pub user_id: u64,
    pub content: String,
    pub created_at: NaiveDateTime,
}
