//! Account routes: signup, login, email check, token reissue, logout.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::error::DomainError;
use crate::user::service::{LoginRequest, SignupRequest, TokenReissueRequest};
use crate::web::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailCheckRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailCheckResponse {
    pub duplicated: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/check-email", post(check_email))
        .route("/reissue", post(reissue))
        .route("/logout", post(logout))
}

async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, DomainError> {
    state.users.signup(&req)?;
    Ok(StatusCode::OK)
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let resp = state.users.login(&req)?;
    Ok(Json(resp))
}

async fn check_email(
    State(state): State<AppState>,
    Json(req): Json<EmailCheckRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let duplicated = state.users.is_email_taken(&req.email)?;
    Ok(Json(EmailCheckResponse { duplicated }))
}

async fn reissue(
    State(state): State<AppState>,
    Json(req): Json<TokenReissueRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let pair = state.users.reissue(&req.refresh_token)?;
    Ok(Json(pair))
}

async fn logout(
    State(state): State<AppState>,
    me: CurrentUser,
) -> Result<impl IntoResponse, DomainError> {
    state.users.logout(&me)?;
    Ok(StatusCode::OK)
}
