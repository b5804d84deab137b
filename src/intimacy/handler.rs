//! Intimacy quiz routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::auth::CurrentUser;
use crate::error::DomainError;
use crate::intimacy::service::TestAnswersRequest;
use crate::web::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/answers", post(submit_answers))
        .route("/me", get(personal_score))
        .route("/family", get(family_score))
}

async fn submit_answers(
    State(state): State<AppState>,
    me: CurrentUser,
    Json(req): Json<TestAnswersRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.current_user(&me)?;
    let resp = state.intimacy.submit_answers(&me, &req)?;
    Ok((StatusCode::CREATED, Json(resp)))
}

async fn personal_score(
    State(state): State<AppState>,
    me: CurrentUser,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.current_user(&me)?;
    Ok(Json(state.intimacy.personal_score(&me)?))
}

async fn family_score(
    State(state): State<AppState>,
    me: CurrentUser,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.approved_member(&me)?;
    Ok(Json(state.intimacy.family_score(&me)?))
}
