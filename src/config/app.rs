//! # Application Configuration Loader
//!
//! Provides a unified configuration loader for application settings,
//! including database, HTTP, CORS, authentication, and timezone.
//!
//! Automatically loads `.env` files for non-production environments.
//! It checks for a custom `DOTENV_FILE` path first, then falls back to
//! `.env.{APP_ENV}` or `.env`.
//!
//! This configuration is initialized once at application startup and shared
//! throughout the system.
//!
//! # Environment Variables
//! | Variable | Description | Default |
//! |-----------|-------------|----------|
//! | `APP_ENV` | Current environment (`development`, `production`, etc.) | `"development"` |
//! | `DOTENV_FILE` | Optional path to a custom dotenv file | *none* |
//! | `DATABASE_URL` | MySQL connection URL | *required* |
//! | `DATABASE_MAX_CONN` | Maximum pool size | driver default |
//! | `HTTP_PORT` | Server port | `8080` |
//! | `HTTP_MAX_BODY_KB` | Max request body size (KiB) | `1024` |
//! | `CORS_ORIGINS` | Allowed origins for CORS | `""` |
//! | `CORS_CREDENTIALS` | Allow cookies/headers in CORS requests | `false` |
//! | `JWT_SECRET` | Base64 signing secret | *required* |
//! | `JWT_ACCESS_TTL_MIN` | Access-token lifetime (minutes) | `60` |
//! | `JWT_REFRESH_TTL_DAYS` | Refresh-token lifetime (days) | `7` |
//! | `APP_TIMEZONE` | IANA timezone for the app clock | `Asia/Seoul` |

use std::env;

use crate::config::{
    auth::AuthConfig,
    db::DbConfig,
    time::TimeConfig,
    web::{CorsConfig, HttpConfig},
};

/// Top-level application configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Database configuration.
    pub db: DbConfig,
    /// HTTP server configuration.
    pub http: HttpConfig,
    /// Cross-Origin Resource Sharing configuration.
    pub cors: CorsConfig,
    /// Token issuance configuration.
    pub auth: AuthConfig,
    /// Application clock timezone.
    pub time: TimeConfig,
}

impl AppConfig {
    /// Loads application configuration from environment variables.
    ///
    /// ## Behavior
    /// - Reads `APP_ENV` (defaults to `"development"`).
    /// - Loads `.env` or `.env.{APP_ENV}` for non-production environments.
    /// - Parses all supported environment variables and falls back to defaults.
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        if app_env != "production" {
            if let Ok(custom) = env::var("DOTENV_FILE") {
                let _ = dotenvy::from_filename(&custom);
            } else if dotenvy::from_filename(format!(".env.{app_env}")).is_err() {
                let _ = dotenvy::dotenv();
            }
        }

        Self {
            db: DbConfig::from_env(),
            http: HttpConfig::from_env(),
            cors: CorsConfig::from_env(),
            auth: AuthConfig::from_env(),
            time: TimeConfig::from_env(),
        }
    }
}
