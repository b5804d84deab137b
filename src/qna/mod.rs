//! The shared daily question: activation scheduling, the 05:00 logical-day
//! answer window, and answer visibility within a family.

pub mod domain;
pub mod handler;
pub mod repository;
pub mod scheduler;
pub mod service;
pub mod store;

pub use scheduler::ActivationScheduler;
pub use service::QnaService;
