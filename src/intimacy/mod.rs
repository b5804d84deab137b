//! The family intimacy quiz and its score views.

pub mod domain;
pub mod handler;
pub mod repository;
pub mod service;
pub mod store;

pub use service::IntimacyService;
