//! Common error handling: the transport-agnostic [`DomainError`] and its
//! HTTP mapping.

pub mod domain;
pub mod http;

pub use domain::{DomainError, DomainResult};
