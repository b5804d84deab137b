use thiserror::Error;

/// Application-level error shared by all feature services.
///
/// # Design
/// - Infrastructure-agnostic (no HTTP types); the web layer decides how each
///   variant is surfaced to clients.
/// - Two of the variants are the recoverable outcomes every request-gating
///   rule produces: [`DomainError::BadRequest`] for logically invalid
///   requests (wrong day, duplicate answer, unknown id) and
///   [`DomainError::Forbidden`] for visibility/ownership denials. Both are
///   safe to retry once the precondition changes.
/// - [`DomainError::Internal`] wraps store and adapter failures; services
///   propagate those with `?` via the `From<anyhow::Error>` impl.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed or logically invalid request.
    #[error("{0}")]
    BadRequest(String),

    /// Authenticated, but not allowed to see or touch the target.
    #[error("{0}")]
    Forbidden(String),

    /// Missing or invalid credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// A referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The request conflicts with existing state (e.g. duplicate email).
    #[error("{0}")]
    Conflict(String),

    /// Unexpected infrastructure failure.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl DomainError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

/// Result alias used throughout the service layer.
pub type DomainResult<T> = Result<T, DomainError>;
