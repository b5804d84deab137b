//! Family groups: creation, invite codes, and the join-request workflow.

pub mod domain;
pub mod handler;
pub mod repository;
pub mod service;
pub mod store;

pub use service::GroupService;
