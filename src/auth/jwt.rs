//! # Authentication utilities (JWT)
//!
//! This module provides **pure** JWT creation and decoding utilities.
//! It does **not** access environment variables directly.
//!
//! ## Design principles
//! - No dependency on `std::env`
//! - No global state
//! - Fully testable with deterministic inputs
//!
//! The signing secret and token lifetime must be supplied by the caller
//! (typically from `AppConfig`).
//!
//! ## Provided functions
//! - [`create_access_token`] — Create a signed access token
//! - [`decode_access_token`] — Validate and decode an access token

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// JWT claims stored inside the token payload.
///
/// ## Fields
/// - `sub`: Subject (user ID, stringified)
/// - `iat`: Issued-at time (UNIX timestamp, seconds)
/// - `exp`: Expiration time (UNIX timestamp, seconds)
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject — the user ID
    pub sub: String,
    /// Issued-at timestamp (UTC, seconds since UNIX epoch)
    pub iat: usize,
    /// Expiration timestamp (UTC, seconds since UNIX epoch)
    pub exp: usize,
}

/// Creates a signed access token for the given user ID.
///
/// ## Arguments
/// - `user_id`: User ID to place in the `sub` claim
/// - `secret`: HMAC secret used to sign the token
/// - `ttl_minutes`: Token lifetime in minutes
///
/// ## Errors
/// Returns an error if JWT encoding fails.
pub fn create_access_token(
    user_id: u64,
    secret: &[u8],
    ttl_minutes: u32,
) -> anyhow::Result<String> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::minutes(i64::from(ttl_minutes)))
        .expect("invalid timestamp");

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp() as usize,
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )?;

    Ok(token)
}

/// Decodes and validates an access token.
///
/// ## Returns
/// Decoded [`Claims`] if the token is valid.
///
/// ## Errors
/// Returns an error if:
/// - The token is malformed
/// - Signature does not match
/// - Token is expired
pub fn decode_access_token(token: &str, secret: &[u8]) -> anyhow::Result<Claims> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    )?;

    Ok(decoded.claims)
}
