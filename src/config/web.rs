//! # HTTP and CORS Configuration
//!
//! Defines basic configuration structures for HTTP request handling and
//! CORS (Cross-Origin Resource Sharing) behavior.
//!
//! These are included within [`AppConfig`](crate::config::app::AppConfig).

use crate::config::env::{read_flag, read_string, read_u32};

/// HTTP server configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpConfig {
    /// TCP port the server binds to.
    pub port: u16,
    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl HttpConfig {
    pub fn from_env() -> Self {
        let port = read_u32("HTTP_PORT", 8080).min(u16::MAX as u32) as u16;
        // Journal entries and answers are short text; 1 MiB is generous.
        let max_body_bytes = read_u32("HTTP_MAX_BODY_KB", 1024) as usize * 1024;
        Self {
            port,
            max_body_bytes,
        }
    }
}

/// CORS (Cross-Origin Resource Sharing) configuration.
///
/// `origins` holds a comma-separated list of allowed origins; empty means
/// the local-development default chosen by the CORS layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub origins: String,
    pub credentials: bool,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        Self {
            origins: read_string("CORS_ORIGINS", ""),
            credentials: read_flag("CORS_CREDENTIALS", false),
        }
    }
}
