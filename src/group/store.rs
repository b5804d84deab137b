//! Persistence ports for family groups and join requests.

use anyhow::Result;

use crate::group::domain::{FamilyGroup, JoinRequest, JoinStatus, NewFamilyGroup, NewJoinRequest};

#[cfg_attr(test, mockall::automock)]
pub trait GroupStore: Send + Sync + 'static {
    fn find_by_id(&self, id: u64) -> Result<Option<FamilyGroup>>;

    fn find_by_invite_code(&self, code: &str) -> Result<Option<FamilyGroup>>;

    fn find_by_admin(&self, admin_user_id: u64) -> Result<Option<FamilyGroup>>;

    /// Inserts a new group and returns its id.
    fn insert(&self, new: &NewFamilyGroup) -> Result<u64>;

    fn update_name(&self, id: u64, name: &str) -> Result<()>;
}

#[cfg_attr(test, mockall::automock)]
pub trait JoinRequestStore: Send + Sync + 'static {
    fn find_by_id(&self, id: u64) -> Result<Option<JoinRequest>>;

    /// The user's most recent join request, if any.
    fn find_by_user(&self, user_id: u64) -> Result<Option<JoinRequest>>;

    fn find_all_by_group(&self, group_id: u64) -> Result<Vec<JoinRequest>>;

    /// Inserts a pending request and returns its id.
    fn insert(&self, new: &NewJoinRequest) -> Result<u64>;

    fn set_status(&self, id: u64, status: JoinStatus) -> Result<()>;
}
