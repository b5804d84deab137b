//! # Authentication Configuration
//!
//! Token-related settings: the HMAC signing secret and the lifetimes of the
//! two token kinds. The secret is expected to be **base64-encoded** in the
//! environment so that binary-strength keys survive `.env` files intact;
//! [`AuthConfig::secret_bytes`] validates and decodes it once at startup.

use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::config::env::read_u32;

/// Authentication and token configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthConfig {
    /// Base64-encoded HMAC secret for access-token signing.
    pub jwt_secret_b64: Option<String>,
    /// Access-token lifetime in minutes.
    pub access_ttl_minutes: u32,
    /// Refresh-token lifetime in days.
    pub refresh_ttl_days: u32,
}

impl AuthConfig {
    /// Builds an [`AuthConfig`] from environment variables.
    ///
    /// - `JWT_SECRET` — base64-encoded signing secret (required to serve)
    /// - `JWT_ACCESS_TTL_MIN` — access-token lifetime, default 60
    /// - `JWT_REFRESH_TTL_DAYS` — refresh-token lifetime, default 7
    pub fn from_env() -> Self {
        Self {
            jwt_secret_b64: std::env::var("JWT_SECRET").ok(),
            access_ttl_minutes: read_u32("JWT_ACCESS_TTL_MIN", 60),
            refresh_ttl_days: read_u32("JWT_REFRESH_TTL_DAYS", 7),
        }
    }

    /// Decodes the configured secret.
    ///
    /// # Errors
    /// Fails when the secret is missing, not valid base64, or decodes to
    /// fewer than 32 bytes (too weak for HS256).
    pub fn secret_bytes(&self) -> Result<Vec<u8>> {
        let b64 = self
            .jwt_secret_b64
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("JWT_SECRET is not set"))?;
        let bytes = STANDARD
            .decode(b64.trim())
            .context("JWT_SECRET is not valid base64")?;
        if bytes.len() < 32 {
            bail!("JWT_SECRET decodes to {} bytes, need at least 32", bytes.len());
        }
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b64_of(len: usize) -> String {
        STANDARD.encode(vec![7u8; len])
    }

    #[test]
    fn reads_defaults() {
        temp_env::with_vars_unset(
            ["JWT_SECRET", "JWT_ACCESS_TTL_MIN", "JWT_REFRESH_TTL_DAYS"],
            || {
                let cfg = AuthConfig::from_env();
                assert_eq!(cfg.jwt_secret_b64, None);
                assert_eq!(cfg.access_ttl_minutes, 60);
                assert_eq!(cfg.refresh_ttl_days, 7);
            },
        );
    }

    #[test]
    fn decodes_valid_secret() {
        let cfg = AuthConfig {
            jwt_secret_b64: Some(b64_of(32)),
            access_ttl_minutes: 60,
            refresh_ttl_days: 7,
        };
        assert_eq!(cfg.secret_bytes().unwrap().len(), 32);
    }

    #[test]
    fn rejects_missing_secret() {
        let cfg = AuthConfig {
            jwt_secret_b64: None,
            access_ttl_minutes: 60,
            refresh_ttl_days: 7,
        };
        assert!(cfg.secret_bytes().is_err());
    }

    #[test]
    fn rejects_invalid_base64() {
        let cfg = AuthConfig {
            jwt_secret_b64: Some("!!not-base64!!".into()),
            access_ttl_minutes: 60,
            refresh_ttl_days: 7,
        };
        assert!(cfg.secret_bytes().is_err());
    }

    #[test]
    fn rejects_short_secret() {
        let cfg = AuthConfig {
            jwt_secret_b64: Some(b64_of(16)),
            access_ttl_minutes: 60,
            refresh_ttl_days: 7,
        };
        let err = cfg.secret_bytes().unwrap_err().to_string();
        assert!(err.contains("at least 32"));
    }
}
