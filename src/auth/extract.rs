//! Request extractor turning an `Authorization: Bearer` header into a
//! [`CurrentUser`].
//!
//! Verification failures never distinguish "missing" from "invalid" beyond
//! the message; both reject with an unauthorized error so handlers can take
//! `CurrentUser` by value and stay free of token plumbing.

use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use crate::auth::jwt::decode_access_token;
use crate::auth::principal::CurrentUser;
use crate::error::DomainError;
use crate::web::state::AppState;

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = DomainError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| DomainError::unauthorized("missing bearer token"))?;

        let claims = decode_access_token(bearer.token(), &state.jwt_secret)
            .map_err(|_| DomainError::unauthorized("invalid or expired token"))?;

        let id: u64 = claims
            .sub
            .parse()
            .map_err(|_| DomainError::unauthorized("invalid token subject"))?;

        Ok(CurrentUser::new(id))
    }
}
