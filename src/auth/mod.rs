//! Authentication: JWT issuance/verification, the authenticated principal,
//! and the axum request extractor.

pub mod extract;
pub mod jwt;
pub mod principal;

pub use principal::CurrentUser;
