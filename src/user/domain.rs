use chrono::NaiveDateTime;

/// A registered member.
///
/// `family_group_id` is `None` until the user is accepted into a family
/// group; most features require an approved membership (see
/// `UserService::approved_member`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub nickname: String,
    pub family_group_id: Option<u64>,
}

/// Insert payload for a new user row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub nickname: String,
}

/// A stored refresh token.
///
/// Only a SHA-256 digest of the secret half is persisted; the raw value
/// (`"{id}.{secret}"`) is handed to the client exactly once at issuance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshToken {
    pub id: u64,
    pub user_id: u64,
    pub token_digest: String,
    pub expires_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

impl RefreshToken {
    /// A token is expired at and after its expiry instant.
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        now >= self.expires_at
    }
}

/// Insert payload for a new refresh token row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRefreshToken {
    pub user_id: u64,
    pub token_digest: String,
    pub expires_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn refresh_token_expiry_is_inclusive() {
        let token = RefreshToken {
            id: 1,
            user_id: 2,
            token_digest: "d".into(),
            expires_at: at(12, 0),
            created_at: at(11, 0),
        };

        assert!(!token.is_expired(at(11, 59)));
        assert!(token.is_expired(at(12, 0)));
        assert!(token.is_expired(at(12, 1)));
    }
}
