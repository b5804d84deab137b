//! Persistence ports for users and refresh tokens.

use anyhow::Result;

use crate::user::domain::{NewRefreshToken, NewUser, RefreshToken, User};

/// Store of registered members.
#[cfg_attr(test, mockall::automock)]
pub trait UserStore: Send + Sync + 'static {
    fn find_by_id(&self, id: u64) -> Result<Option<User>>;

    fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    fn email_exists(&self, email: &str) -> Result<bool>;

    /// Inserts a new user and returns its id.
    fn insert(&self, new: &NewUser) -> Result<u64>;

    fn update_nickname(&self, id: u64, nickname: &str) -> Result<()>;

    /// Attaches the user to a family group.
    fn set_family_group(&self, id: u64, group_id: u64) -> Result<()>;

    /// All members of the given family group, ordered by id.
    fn find_all_by_group(&self, group_id: u64) -> Result<Vec<User>>;
}

/// Store of refresh tokens, one active row per user.
#[cfg_attr(test, mockall::automock)]
pub trait RefreshTokenStore: Send + Sync + 'static {
    fn find_by_id(&self, id: u64) -> Result<Option<RefreshToken>>;

    /// Inserts a new token row and returns its id.
    fn insert(&self, new: &NewRefreshToken) -> Result<u64>;

    fn delete_by_id(&self, id: u64) -> Result<()>;

    fn delete_by_user(&self, user_id: u64) -> Result<()>;
}
