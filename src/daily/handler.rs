//! Journal routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::error::DomainError;
use crate::web::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRequest {
    pub content: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_daily))
        .route("/weekly", get(weekly))
        .route(
            "/{daily_id}",
            get(detail).put(update_daily).delete(delete_daily),
        )
        .route("/{daily_id}/comments", post(add_comment))
        .route(
            "/{daily_id}/comments/{comment_id}",
            axum::routing::put(update_comment).delete(delete_comment),
        )
        .route("/{daily_id}/likes", post(toggle_like))
}

async fn create_daily(
    State(state): State<AppState>,
    me: CurrentUser,
    Json(req): Json<ContentRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.approved_member(&me)?;
    let resp = state.daily.create(&me, &req.content)?;
    Ok((StatusCode::CREATED, Json(resp)))
}

async fn weekly(
    State(state): State<AppState>,
    me: CurrentUser,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.approved_member(&me)?;
    Ok(Json(state.daily.weekly(&me)?))
}

async fn detail(
    State(state): State<AppState>,
    me: CurrentUser,
    Path(daily_id): Path<u64>,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.approved_member(&me)?;
    Ok(Json(state.daily.detail(&me, daily_id)?))
}

async fn update_daily(
    State(state): State<AppState>,
    me: CurrentUser,
    Path(daily_id): Path<u64>,
    Json(req): Json<ContentRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.approved_member(&me)?;
    Ok(Json(state.daily.update(&me, daily_id, &req.content)?))
}

async fn delete_daily(
    State(state): State<AppState>,
    me: CurrentUser,
    Path(daily_id): Path<u64>,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.approved_member(&me)?;
    Ok(Json(state.daily.delete(&me, daily_id)?))
}

async fn add_comment(
    State(state): State<AppState>,
    me: CurrentUser,
    Path(daily_id): Path<u64>,
    Json(req): Json<ContentRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.approved_member(&me)?;
    let resp = state.daily.add_comment(&me, daily_id, &req.content)?;
    Ok((StatusCode::CREATED, Json(resp)))
}

async fn update_comment(
    State(state): State<AppState>,
    me: CurrentUser,
    Path((daily_id, comment_id)): Path<(u64, u64)>,
    Json(req): Json<ContentRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.approved_member(&me)?;
    Ok(Json(state.daily.update_comment(
        &me,
        daily_id,
        comment_id,
        &req.content,
    )?))
}

async fn delete_comment(
    State(state): State<AppState>,
    me: CurrentUser,
    Path((daily_id, comment_id)): Path<(u64, u64)>,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.approved_member(&me)?;
    Ok(Json(state.daily.delete_comment(&me, daily_id, comment_id)?))
}

async fn toggle_like(
    State(state): State<AppState>,
    me: CurrentUser,
    Path(daily_id): Path<u64>,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.approved_member(&me)?;
    Ok(Json(state.daily.toggle_like(&me, daily_id)?))
}
