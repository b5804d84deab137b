//! Daily-question routes.
//!
//! All routes require an approved family membership; the answer-window and
//! visibility rules live in `QnaService`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::error::DomainError;
use crate::web::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub year: i32,
    pub month: u32,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/everyday", get(today_question))
        .route("/monthly", get(monthly_questions))
        .route("/{question_id}", get(question_detail))
        .route(
            "/{question_id}/answers",
            axum::routing::post(submit_answer)
                .put(update_answer)
                .delete(delete_answer),
        )
}

async fn today_question(
    State(state): State<AppState>,
    me: CurrentUser,
) -> Result<impl IntoResponse, DomainError> {
    state.users.approved_member(&me)?;
    Ok(Json(state.qna.today_question()?))
}

async fn monthly_questions(
    State(state): State<AppState>,
    me: CurrentUser,
    Query(q): Query<MonthQuery>,
) -> Result<impl IntoResponse, DomainError> {
    state.users.approved_member(&me)?;
    Ok(Json(state.qna.monthly_questions(q.year, q.month)?))
}

async fn question_detail(
    State(state): State<AppState>,
    me: CurrentUser,
    Path(question_id): Path<u64>,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.approved_member(&me)?;
    Ok(Json(state.qna.question_detail(&me, question_id)?))
}

async fn submit_answer(
    State(state): State<AppState>,
    me: CurrentUser,
    Path(question_id): Path<u64>,
    Json(req): Json<AnswerRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.approved_member(&me)?;
    let resp = state.qna.submit_answer(&me, question_id, &req.answer)?;
    Ok((StatusCode::CREATED, Json(resp)))
}

async fn update_answer(
    State(state): State<AppState>,
    me: CurrentUser,
    Path(question_id): Path<u64>,
    Json(req): Json<AnswerRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.approved_member(&me)?;
    Ok(Json(state.qna.update_answer(&me, question_id, &req.answer)?))
}

async fn delete_answer(
    State(state): State<AppState>,
    me: CurrentUser,
    Path(question_id): Path<u64>,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.approved_member(&me)?;
    Ok(Json(state.qna.delete_answer(&me, question_id)?))
}
