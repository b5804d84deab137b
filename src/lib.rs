//! # danran_web
//!
//! REST backend for the Danran family journaling app.
//!
//! Families form a private group, write daily journal entries with comments
//! and likes, share an emotional state, answer one shared question per day,
//! and take an intimacy quiz.
//!
//! The crate is layered hexagonally:
//! - Each feature (`user`, `group`, `qna`, `daily`, `emotion`, `intimacy`)
//!   owns its domain types, a store port, a service, a MySQL repository,
//!   and thin axum handlers.
//! - Infrastructure concerns live in `db` (the synchronous `Db` port and
//!   its MySQL adapter), `time` (the injectable `Clock` and the 05:00
//!   logical-day boundary), `auth` (JWT issue/verify and the request
//!   principal), `error`, and `config`.
//! - `src/main.rs` is the composition root: it loads `AppConfig`, builds
//!   the pool, wires stores into services, spawns the daily question
//!   activation task, and serves the router.
//!
//! ## Example usage (as a library)
//!
//! ```rust,no_run
//! use danran_web::config::AppConfig;
//! use danran_web::config::db::create_pool;
//!
//! let cfg = AppConfig::from_env();
//! let pool = create_pool(&cfg.db).expect("failed to create pool");
//! ```

// ===============================
// Re-exports of external crates
// ===============================

pub use anyhow;
pub use axum;
pub use axum_extra;
pub use base64;
pub use chrono;
pub use chrono_tz;
pub use dotenvy;
pub use mysql;
pub use rand;
pub use serde;
pub use serde_json;
pub use sha2;
pub use subtle;
pub use tokio;
pub use tower;
pub use tower_http;
pub use uuid;

// ===============================
// Public modules
// ===============================
pub mod auth;
pub mod config;
pub mod daily;
pub mod db;
pub mod emotion;
pub mod error;
pub mod group;
pub mod intimacy;
pub mod qna;
pub mod time;
pub mod user;
pub mod web;
