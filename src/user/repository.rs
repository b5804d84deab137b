//! MySQL-backed stores for users and refresh tokens.
//!
//! Tables:
//! - `users` (`user_id`, `name`, `email`, `password_hash`, `nickname`,
//!   `family_group_id` NULL)
//! - `refresh_tokens` (`refresh_token_id`, `user_id`, `token_digest`,
//!   `expires_at`, `created_at`)

use std::sync::Arc;

use anyhow::Result;

use crate::db::port::{Db, Param, Row};
use crate::params;
use crate::user::domain::{NewRefreshToken, NewUser, RefreshToken, User};
use crate::user::store::{RefreshTokenStore, UserStore};

const USER_COLS: &str = "user_id, name, email, password_hash, nickname, family_group_id";

fn user_from_row(row: &Row) -> Result<User> {
    Ok(User {
        id: row.get_u64("user_id")?,
        name: row.get_string("name")?,
        email: row.get_string("email")?,
        password_hash: row.get_string("password_hash")?,
        nickname: row.get_string("nickname")?,
        family_group_id: row.get_u64_opt("family_group_id")?,
    })
}

pub struct MySqlUserStore {
    db: Arc<dyn Db>,
}

impl MySqlUserStore {
    pub fn new(db: Arc<dyn Db>) -> Self {
        Self { db }
    }
}

impl UserStore for MySqlUserStore {
    fn find_by_id(&self, id: u64) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLS} FROM users WHERE user_id = ?");
        let row = self.db.fetch_one(&sql, &params![id])?;
        row.as_ref().map(user_from_row).transpose()
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLS} FROM users WHERE email = ?");
        let row = self.db.fetch_one(&sql, &params![email])?;
        row.as_ref().map(user_from_row).transpose()
    }

    fn email_exists(&self, email: &str) -> Result<bool> {
        let row = self
            .db
            .fetch_one("SELECT user_id FROM users WHERE email = ?", &params![email])?;
        Ok(row.is_some())
    }

    fn insert(&self, new: &NewUser) -> Result<u64> {
        self.db.exec_returning_last_insert_id(
            "INSERT INTO users (name, email, password_hash, nickname) VALUES (?, ?, ?, ?)",
            &params![
                new.name.as_str(),
                new.email.as_str(),
                new.password_hash.as_str(),
                new.nickname.as_str()
            ],
        )
    }

    fn update_nickname(&self, id: u64, nickname: &str) -> Result<()> {
        self.db.exec(
            "UPDATE users SET nickname = ? WHERE user_id = ?",
            &params![nickname, id],
        )?;
        Ok(())
    }

    fn set_family_group(&self, id: u64, group_id: u64) -> Result<()> {
        self.db.exec(
            "UPDATE users SET family_group_id = ? WHERE user_id = ?",
            &params![group_id, id],
        )?;
        Ok(())
    }

    fn find_all_by_group(&self, group_id: u64) -> Result<Vec<User>> {
        let sql = format!("SELECT {USER_COLS} FROM users WHERE family_group_id = ? ORDER BY user_id");
        let rows = self.db.fetch_all(&sql, &params![group_id])?;
        rows.iter().map(user_from_row).collect()
    }
}

fn refresh_from_row(row: &Row) -> Result<RefreshToken> {
    Ok(RefreshToken {
        id: row.get_u64("refresh_token_id")?,
        user_id: row.get_u64("user_id")?,
        token_digest: row.get_string("token_digest")?,
        expires_at: row.get_datetime("expires_at")?,
        created_at: row.get_datetime("created_at")?,
    })
}

pub struct MySqlRefreshTokenStore {
    db: Arc<dyn Db>,
}

impl MySqlRefreshTokenStore {
    pub fn new(db: Arc<dyn Db>) -> Self {
        Self { db }
    }
}

impl RefreshTokenStore for MySqlRefreshTokenStore {
    fn find_by_id(&self, id: u64) -> Result<Option<RefreshToken>> {
        let row = self.db.fetch_one(
            "SELECT refresh_token_id, user_id, token_digest, expires_at, created_at \
             FROM refresh_tokens WHERE refresh_token_id = ?",
            &params![id],
        )?;
        row.as_ref().map(refresh_from_row).transpose()
    }

    fn insert(&self, new: &NewRefreshToken) -> Result<u64> {
        self.db.exec_returning_last_insert_id(
            "INSERT INTO refresh_tokens (user_id, token_digest, expires_at, created_at) \
             VALUES (?, ?, ?, ?)",
            &params![
                new.user_id,
                new.token_digest.as_str(),
                new.expires_at,
                new.created_at
            ],
        )
    }

    fn delete_by_id(&self, id: u64) -> Result<()> {
        self.db.exec(
            "DELETE FROM refresh_tokens WHERE refresh_token_id = ?",
            &params![id],
        )?;
        Ok(())
    }

    fn delete_by_user(&self, user_id: u64) -> Result<()> {
        self.db.exec(
            "DELETE FROM refresh_tokens WHERE user_id = ?",
            &params![user_id],
        )?;
        Ok(())
    }
}
