//! HTTP plumbing: CORS, shared state, and the route table.

pub mod cors;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
