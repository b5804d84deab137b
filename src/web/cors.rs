//! # CORS (Cross-Origin Resource Sharing) Utilities
//!
//! Provides a configurable [`CorsLayer`] builder for the API router.
//!
//! CORS settings are derived from [`CorsConfig`], allowing runtime
//! customization of allowed origins and credentials.
//!
//! If no origins are configured, defaults to allowing `http://localhost:5173`
//! — suitable for local frontend development.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::web::CorsConfig;

/// Parses a comma-separated list of origins from environment configuration.
///
/// Invalid or empty entries are ignored.
fn parse_origins(cors_env: &str) -> Vec<HeaderValue> {
    cors_env
        .split(',')
        .filter_map(|s| {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                HeaderValue::from_str(s).ok()
            }
        })
        .collect()
}

/// Builds a [`CorsLayer`] configured from [`CorsConfig`].
///
/// - Allows the JSON API's methods plus `OPTIONS` preflight.
/// - Always includes `Content-Type` and `Authorization` headers.
/// - Defaults to `http://localhost:5173` when no origins are provided.
/// - Enables credentials when `CorsConfig.credentials` is `true`.
pub fn build_cors(cfg: &CorsConfig) -> CorsLayer {
    let mut origins = parse_origins(&cfg.origins);
    if origins.is_empty() {
        origins.push(HeaderValue::from_static("http://localhost:5173"));
    }

    let mut layer = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if cfg.credentials {
        layer = layer.allow_credentials(true);
    }

    layer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_origins() {
        let origins = parse_origins("https://app.example, https://admin.example");
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "https://app.example");
    }

    #[test]
    fn skips_empty_and_invalid_entries() {
        let origins = parse_origins(" , https://app.example,\u{0} ,");
        assert_eq!(origins.len(), 1);
    }

    #[test]
    fn builds_layer_with_defaults() {
        let cfg = CorsConfig {
            origins: String::new(),
            credentials: false,
        };
        // Construction must not panic with an empty origin list.
        let _ = build_cors(&cfg);
    }
}
