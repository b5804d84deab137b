//! Family-group workflow: creation, invite-code joins, and the admin's
//! approval queue.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{DomainError, DomainResult};
use crate::group::domain::{
    FamilyGroup, JoinStatus, NewFamilyGroup, NewJoinRequest, generate_invite_code,
};
use crate::group::store::{GroupStore, JoinRequestStore};
use crate::time::Clock;
use crate::user::domain::User;
use crate::user::store::UserStore;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub group_name: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse {
    pub group_id: u64,
    pub group_name: String,
    pub invite_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGroupRequest {
    pub invite_code: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JoinStatusResponse {
    pub request_id: u64,
    pub user_name: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecideJoinRequest {
    pub request_id: u64,
    /// `"APPROVED"` or `"REJECTED"`.
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameGroupRequest {
    pub new_name: String,
}

pub struct GroupService {
    groups: Arc<dyn GroupStore>,
    join_requests: Arc<dyn JoinRequestStore>,
    users: Arc<dyn UserStore>,
    clock: Arc<dyn Clock>,
}

impl GroupService {
    pub fn new(
        groups: Arc<dyn GroupStore>,
        join_requests: Arc<dyn JoinRequestStore>,
        users: Arc<dyn UserStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            groups,
            join_requests,
            users,
            clock,
        }
    }

    /// Creates a group with the caller as admin and first member.
    pub fn create_group(&self, me: &User, req: &CreateGroupRequest) -> DomainResult<GroupResponse> {
        if self.groups.find_by_admin(me.id)?.is_some() {
            return Err(DomainError::bad_request("you can only create one group"));
        }
        if me.family_group_id.is_some() {
            return Err(DomainError::conflict("already in a family group"));
        }

        let new = NewFamilyGroup {
            name: req.group_name.clone(),
            invite_code: generate_invite_code(),
            admin_user_id: me.id,
            created_at: self.clock.now(),
        };
        let group_id = self.groups.insert(&new)?;
        self.users.set_family_group(me.id, group_id)?;

        info!(group_id, admin = me.id, "family group created");
        Ok(GroupResponse {
            group_id,
            group_name: new.name,
            invite_code: new.invite_code,
        })
    }

    /// Files a join request against the group owning the invite code.
    pub fn request_join(
        &self,
        me: &User,
        req: &JoinGroupRequest,
    ) -> DomainResult<JoinStatusResponse> {
        let group = self
            .groups
            .find_by_invite_code(&req.invite_code)?
            .ok_or_else(|| DomainError::bad_request("invalid invite code"))?;

        if me.family_group_id.is_some() {
            return Err(DomainError::conflict("already in a family group"));
        }
        if let Some(existing) = self.join_requests.find_by_user(me.id)? {
            if existing.status == JoinStatus::Pending {
                return Err(DomainError::conflict("join request already pending"));
            }
        }

        let now = self.clock.now();
        let id = self.join_requests.insert(&NewJoinRequest {
            group_id: group.id,
            user_id: me.id,
            invite_code: req.invite_code.clone(),
            created_at: now,
        })?;

        Ok(JoinStatusResponse {
            request_id: id,
            user_name: Some(me.name.clone()),
            status: JoinStatus::Pending.as_str().to_string(),
            created_at: now,
        })
    }

    /// The caller's own join request state.
    pub fn my_join_status(&self, me: &User) -> DomainResult<JoinStatusResponse> {
        let req = self
            .join_requests
            .find_by_user(me.id)?
            .ok_or(DomainError::NotFound("Join request"))?;
        Ok(JoinStatusResponse {
            request_id: req.id,
            user_name: Some(me.name.clone()),
            status: req.status.as_str().to_string(),
            created_at: req.created_at,
        })
    }

    /// Lists all join requests for the caller's group. Admin only.
    pub fn join_requests(&self, me: &User) -> DomainResult<Vec<JoinStatusResponse>> {
        let group = self.admin_group(me)?;
        let requests = self.join_requests.find_all_by_group(group.id)?;

        requests
            .into_iter()
            .map(|req| {
                let name = self.users.find_by_id(req.user_id)?.map(|u| u.name);
                Ok(JoinStatusResponse {
                    request_id: req.id,
                    user_name: name,
                    status: req.status.as_str().to_string(),
                    created_at: req.created_at,
                })
            })
            .collect()
    }

    /// Approves or rejects a pending request. Admin only; approval attaches
    /// the requester to the group.
    pub fn decide_join(&self, me: &User, req: &DecideJoinRequest) -> DomainResult<JoinStatusResponse> {
        let decision = JoinStatus::parse(&req.status)
            .filter(|s| *s != JoinStatus::Pending)
            .ok_or_else(|| DomainError::bad_request("status must be APPROVED or REJECTED"))?;

        let group = self.admin_group(me)?;
        let target = self
            .join_requests
            .find_by_id(req.request_id)?
            .filter(|r| r.group_id == group.id)
            .ok_or(DomainError::NotFound("Join request"))?;

        self.join_requests.set_status(target.id, decision)?;
        if decision == JoinStatus::Approved {
            self.users.set_family_group(target.user_id, group.id)?;
            info!(group_id = group.id, user_id = target.user_id, "join approved");
        }

        let name = self.users.find_by_id(target.user_id)?.map(|u| u.name);
        Ok(JoinStatusResponse {
            request_id: target.id,
            user_name: name,
            status: decision.as_str().to_string(),
            created_at: target.created_at,
        })
    }

    /// Renames the caller's group. Any member may rename.
    pub fn rename_group(&self, me: &User, req: &RenameGroupRequest) -> DomainResult<GroupResponse> {
        let group_id = me
            .family_group_id
            .ok_or(DomainError::NotFound("Group"))?;
        let group = self
            .groups
            .find_by_id(group_id)?
            .ok_or(DomainError::NotFound("Group"))?;

        self.groups.update_name(group.id, &req.new_name)?;
        Ok(GroupResponse {
            group_id: group.id,
            group_name: req.new_name.clone(),
            invite_code: group.invite_code,
        })
    }

    fn admin_group(&self, me: &User) -> DomainResult<FamilyGroup> {
        self.groups
            .find_by_admin(me.id)?
            .ok_or_else(|| DomainError::forbidden("only the group admin can do this"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::domain::JoinRequest;
    use crate::group::store::{MockGroupStore, MockJoinRequestStore};
    use crate::time::FixedClock;
    use crate::user::store::MockUserStore;
    use mockall::predicate::eq;

    fn me(id: u64, group: Option<u64>) -> User {
        User {
            id,
            name: "Alice".into(),
            email: "alice@example.com".into(),
            password_hash: "x".into(),
            nickname: "Alice".into(),
            family_group_id: group,
        }
    }

    fn group_row(id: u64, admin: u64) -> FamilyGroup {
        FamilyGroup {
            id,
            name: "us".into(),
            invite_code: "ABCD1234".into(),
            admin_user_id: admin,
            created_at: FixedClock::at(2024, 6, 1, 10, 0, 0).now(),
            updated_at: None,
        }
    }

    fn service(
        groups: MockGroupStore,
        join_requests: MockJoinRequestStore,
        users: MockUserStore,
    ) -> GroupService {
        GroupService::new(
            Arc::new(groups),
            Arc::new(join_requests),
            Arc::new(users),
            Arc::new(FixedClock::at(2024, 6, 1, 10, 0, 0)),
        )
    }

    #[test]
    fn create_group_attaches_admin_as_member() {
        let mut groups = MockGroupStore::new();
        groups.expect_find_by_admin().returning(|_| Ok(None));
        groups.expect_insert().returning(|_| Ok(10));

        let mut users = MockUserStore::new();
        users
            .expect_set_family_group()
            .with(eq(1u64), eq(10u64))
            .times(1)
            .returning(|_, _| Ok(()));

        let svc = service(groups, MockJoinRequestStore::new(), users);
        let resp = svc
            .create_group(
                &me(1, None),
                &CreateGroupRequest {
                    group_name: "us".into(),
                },
            )
            .unwrap();

        assert_eq!(resp.group_id, 10);
        assert_eq!(resp.invite_code.len(), 8);
    }

    #[test]
    fn second_group_by_same_admin_is_rejected() {
        let mut groups = MockGroupStore::new();
        groups
            .expect_find_by_admin()
            .returning(|_| Ok(Some(group_row(10, 1))));

        let svc = service(groups, MockJoinRequestStore::new(), MockUserStore::new());
        let err = svc
            .create_group(
                &me(1, Some(10)),
                &CreateGroupRequest {
                    group_name: "again".into(),
                },
            )
            .unwrap_err();

        assert!(matches!(err, DomainError::BadRequest(_)));
    }

    #[test]
    fn join_with_unknown_code_is_rejected() {
        let mut groups = MockGroupStore::new();
        groups.expect_find_by_invite_code().returning(|_| Ok(None));

        let svc = service(groups, MockJoinRequestStore::new(), MockUserStore::new());
        let err = svc
            .request_join(
                &me(2, None),
                &JoinGroupRequest {
                    invite_code: "NOPE0000".into(),
                },
            )
            .unwrap_err();

        assert!(matches!(err, DomainError::BadRequest(_)));
    }

    #[test]
    fn join_while_already_grouped_is_a_conflict() {
        let mut groups = MockGroupStore::new();
        groups
            .expect_find_by_invite_code()
            .returning(|_| Ok(Some(group_row(10, 1))));

        let svc = service(groups, MockJoinRequestStore::new(), MockUserStore::new());
        let err = svc
            .request_join(
                &me(2, Some(11)),
                &JoinGroupRequest {
                    invite_code: "ABCD1234".into(),
                },
            )
            .unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn approval_attaches_requester_to_group() {
        let mut groups = MockGroupStore::new();
        groups
            .expect_find_by_admin()
            .returning(|_| Ok(Some(group_row(10, 1))));

        let mut join_requests = MockJoinRequestStore::new();
        join_requests.expect_find_by_id().returning(|id| {
            Ok(Some(JoinRequest {
                id,
                group_id: 10,
                user_id: 2,
                invite_code: "ABCD1234".into(),
                status: JoinStatus::Pending,
                created_at: FixedClock::at(2024, 6, 1, 9, 0, 0).now(),
                updated_at: None,
            }))
        });
        join_requests
            .expect_set_status()
            .with(eq(5u64), eq(JoinStatus::Approved))
            .times(1)
            .returning(|_, _| Ok(()));

        let mut users = MockUserStore::new();
        users
            .expect_set_family_group()
            .with(eq(2u64), eq(10u64))
            .times(1)
            .returning(|_, _| Ok(()));
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(me(id, Some(10)))));

        let svc = service(groups, join_requests, users);
        let resp = svc
            .decide_join(
                &me(1, Some(10)),
                &DecideJoinRequest {
                    request_id: 5,
                    status: "APPROVED".into(),
                },
            )
            .unwrap();

        assert_eq!(resp.status, "APPROVED");
    }

    #[test]
    fn decide_rejects_pending_as_a_decision() {
        let svc = service(
            MockGroupStore::new(),
            MockJoinRequestStore::new(),
            MockUserStore::new(),
        );
        let err = svc
            .decide_join(
                &me(1, Some(10)),
                &DecideJoinRequest {
                    request_id: 5,
                    status: "PENDING".into(),
                },
            )
            .unwrap_err();

        assert!(matches!(err, DomainError::BadRequest(_)));
    }
}
