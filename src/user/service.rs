//! Account and session flows: signup, login, token reissue, logout, and the
//! identity lookups every other feature builds on.
//!
//! Passwords are hashed with Argon2; the hash string carries its own salt
//! and parameters. Refresh tokens are opaque `"{id}.{secret}"` values whose
//! secret half is stored only as a SHA-256 digest and compared in constant
//! time. Reissue rotates: the presented token row is deleted and a fresh
//! pair is returned.

use std::sync::Arc;

use anyhow::anyhow;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Days;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::info;
use uuid::Uuid;

use crate::auth::jwt::create_access_token;
use crate::auth::principal::CurrentUser;
use crate::error::{DomainError, DomainResult};
use crate::intimacy::store::IntimacyScoreStore;
use crate::time::Clock;
use crate::user::domain::{NewRefreshToken, NewUser, User};
use crate::user::store::{RefreshTokenStore, UserStore};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: u64,
    pub name: String,
    pub email: String,
    pub token: String,
    pub refresh_token: String,
    pub family_group_id: Option<u64>,
    pub has_intimacy_test: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenReissueRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

/// Returns the stored form of a refresh-token secret.
fn digest_secret(secret: &str) -> String {
    STANDARD.encode(Sha256::digest(secret.as_bytes()))
}

pub struct UserService {
    users: Arc<dyn UserStore>,
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    scores: Arc<dyn IntimacyScoreStore>,
    clock: Arc<dyn Clock>,
    jwt_secret: Arc<Vec<u8>>,
    access_ttl_minutes: u32,
    refresh_ttl_days: u32,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        scores: Arc<dyn IntimacyScoreStore>,
        clock: Arc<dyn Clock>,
        jwt_secret: Arc<Vec<u8>>,
        access_ttl_minutes: u32,
        refresh_ttl_days: u32,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            scores,
            clock,
            jwt_secret,
            access_ttl_minutes,
            refresh_ttl_days,
        }
    }

    // ------------------------------
    // Identity lookups
    // ------------------------------

    /// Loads the caller's user row.
    pub fn current_user(&self, principal: &CurrentUser) -> DomainResult<User> {
        self.users
            .find_by_id(principal.id)?
            .ok_or_else(|| DomainError::unauthorized("unknown user"))
    }

    /// Loads the caller and requires an approved family-group membership.
    pub fn approved_member(&self, principal: &CurrentUser) -> DomainResult<User> {
        let me = self.current_user(principal)?;
        if me.family_group_id.is_none() {
            return Err(DomainError::forbidden("no approved family group"));
        }
        Ok(me)
    }

    /// All members of the caller's family group, the caller included.
    pub fn family_members(&self, me: &User) -> DomainResult<Vec<User>> {
        let group_id = me
            .family_group_id
            .ok_or_else(|| DomainError::forbidden("no approved family group"))?;
        Ok(self.users.find_all_by_group(group_id)?)
    }

    // ------------------------------
    // Account flows
    // ------------------------------

    pub fn signup(&self, req: &SignupRequest) -> DomainResult<()> {
        if self.users.email_exists(&req.email)? {
            return Err(DomainError::conflict("email is already registered"));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| anyhow!("password hashing failed: {e}"))?
            .to_string();

        let id = self.users.insert(&NewUser {
            name: req.name.clone(),
            email: req.email.clone(),
            password_hash: hash,
            // New accounts start with the real name as nickname.
            nickname: req.name.clone(),
        })?;
        info!(user_id = id, "user signed up");
        Ok(())
    }

    pub fn login(&self, req: &LoginRequest) -> DomainResult<LoginResponse> {
        let user = self
            .users
            .find_by_email(&req.email)?
            .ok_or_else(|| DomainError::bad_request("invalid email or password"))?;

        let parsed = PasswordHash::new(&user.password_hash)
            .map_err(|e| anyhow!("stored password hash is corrupt: {e}"))?;
        if Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed)
            .is_err()
        {
            return Err(DomainError::bad_request("invalid email or password"));
        }

        let token = create_access_token(user.id, &self.jwt_secret, self.access_ttl_minutes)?;
        let refresh_token = self.issue_refresh_token(user.id)?;
        let has_intimacy_test = self.scores.find_latest_by_user(user.id)?.is_some();

        info!(user_id = user.id, "user logged in");
        Ok(LoginResponse {
            user_id: user.id,
            name: user.name,
            email: user.email,
            token,
            refresh_token,
            family_group_id: user.family_group_id,
            has_intimacy_test,
        })
    }

    pub fn is_email_taken(&self, email: &str) -> DomainResult<bool> {
        Ok(self.users.email_exists(email)?)
    }

    /// Exchanges a refresh token for a fresh access/refresh pair.
    ///
    /// The presented token is consumed regardless of expiry; an expired
    /// token requires a new login.
    pub fn reissue(&self, raw_refresh_token: &str) -> DomainResult<TokenPair> {
        let stored = self.verify_refresh_token(raw_refresh_token)?;

        // Rotate: the old token is single-use.
        self.refresh_tokens.delete_by_id(stored.id)?;

        let token = create_access_token(stored.user_id, &self.jwt_secret, self.access_ttl_minutes)?;
        let refresh_token = self.issue_refresh_token(stored.user_id)?;
        Ok(TokenPair {
            token,
            refresh_token,
        })
    }

    pub fn logout(&self, principal: &CurrentUser) -> DomainResult<()> {
        let me = self.current_user(principal)?;
        self.refresh_tokens.delete_by_user(me.id)?;
        info!(user_id = me.id, "user logged out");
        Ok(())
    }

    // ------------------------------
    // Refresh-token helpers
    // ------------------------------

    fn issue_refresh_token(&self, user_id: u64) -> DomainResult<String> {
        // One active refresh token per user.
        self.refresh_tokens.delete_by_user(user_id)?;

        let secret = Uuid::new_v4().to_string();
        let now = self.clock.now();
        let expires_at = now
            .checked_add_days(Days::new(u64::from(self.refresh_ttl_days)))
            .ok_or_else(|| anyhow!("refresh expiry out of range"))?;

        let id = self.refresh_tokens.insert(&NewRefreshToken {
            user_id,
            token_digest: digest_secret(&secret),
            expires_at,
            created_at: now,
        })?;

        Ok(format!("{id}.{secret}"))
    }

    fn verify_refresh_token(
        &self,
        raw: &str,
    ) -> DomainResult<crate::user::domain::RefreshToken> {
        let invalid = || DomainError::bad_request("invalid refresh token");

        let (id_part, secret_part) = raw.split_once('.').ok_or_else(invalid)?;
        let id: u64 = id_part.parse().map_err(|_| invalid())?;

        let stored = self.refresh_tokens.find_by_id(id)?.ok_or_else(invalid)?;

        let presented = digest_secret(secret_part);
        if presented
            .as_bytes()
            .ct_eq(stored.token_digest.as_bytes())
            .unwrap_u8()
            != 1
        {
            return Err(invalid());
        }

        if stored.is_expired(self.clock.now()) {
            self.refresh_tokens.delete_by_id(stored.id)?;
            return Err(DomainError::bad_request(
                "refresh token expired, log in again",
            ));
        }

        Ok(stored)
    }
}
