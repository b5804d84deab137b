use chrono::NaiveDateTime;
use rand::Rng;

/// A family group. One admin, many members, joined via an invite code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FamilyGroup {
    pub id: u64,
    pub name: String,
    pub invite_code: String,
    pub admin_user_id: u64,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewFamilyGroup {
    pub name: String,
    pub invite_code: String,
    pub admin_user_id: u64,
    pub created_at: NaiveDateTime,
}

/// Outcome of an invitation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinStatus {
    Pending,
    Approved,
    Rejected,
}

impl JoinStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinStatus::Pending => "PENDING",
            JoinStatus::Approved => "APPROVED",
            JoinStatus::Rejected => "REJECTED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(JoinStatus::Pending),
            "APPROVED" => Some(JoinStatus::Approved),
            "REJECTED" => Some(JoinStatus::Rejected),
            _ => None,
        }
    }
}

/// A user's request to join a group, decided by the group admin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinRequest {
    pub id: u64,
    pub group_id: u64,
    pub user_id: u64,
    pub invite_code: String,
    pub status: JoinStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewJoinRequest {
    pub group_id: u64,
    pub user_id: u64,
    pub invite_code: String,
    pub created_at: NaiveDateTime,
}

const INVITE_CODE_LEN: usize = 8;
const INVITE_CODE_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a random 8-character invite code (A-Z, 0-9).
///
/// Uniqueness is enforced by the store's unique index; the code space is
/// large enough that collisions are retried by the caller, not prevented.
pub fn generate_invite_code() -> String {
    let mut rng = rand::rng();
    (0..INVITE_CODE_LEN)
        .map(|_| INVITE_CODE_CHARS[rng.random_range(0..INVITE_CODE_CHARS.len())] as char)
        .collect()
}
