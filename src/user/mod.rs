//! Members and sessions: signup/login, refresh-token rotation, and the
//! identity lookups (current user, approved member, family members) that
//! the journaling features depend on.

pub mod domain;
pub mod handler;
pub mod repository;
pub mod service;
pub mod store;

pub use domain::User;
pub use service::UserService;
