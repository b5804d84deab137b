/// An authenticated principal extracted from an authentication mechanism
/// (e.g. JWT).
///
/// # Overview
///
/// `CurrentUser` represents the *result of authentication*, not a domain
/// user. It deliberately does **not** carry any application state such as
/// group membership, nickname, or profile data. It only holds the verified
/// user id, leaving all interpretation and authorization decisions to the
/// service layer (see `UserService::approved_member`).
///
/// # Design Intent
///
/// - Preserve clear boundaries between:
///   - authentication (token verification, this type)
///   - authorization (service responsibility)
/// - Keep handlers honest: a `CurrentUser` argument documents that the
///   route requires a valid token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    /// The verified user id (the JWT `sub` claim, parsed).
    pub id: u64,
}

impl CurrentUser {
    /// Creates a new `CurrentUser` from a verified user id.
    ///
    /// This constructor performs no validation; it is meant to be called by
    /// the request extractor after the token has been verified.
    pub fn new(id: u64) -> Self {
        Self { id }
    }
}
