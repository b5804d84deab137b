//! Emotion routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};

use crate::auth::CurrentUser;
use crate::emotion::service::{CreateEmotionRequest, UpdateEmotionRequest, UpdateNicknameRequest};
use crate::error::DomainError;
use crate::web::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(add_emotion).put(update_emotion))
        .route("/family", get(group_emotions))
        .route("/{emotion_id}", get(detail))
        .route("/{emotion_id}/nickname", patch(update_member_nickname))
}

async fn add_emotion(
    State(state): State<AppState>,
    me: CurrentUser,
    Json(req): Json<CreateEmotionRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.approved_member(&me)?;
    let resp = state.emotions.add(&me, &req)?;
    Ok((StatusCode::CREATED, Json(resp)))
}

async fn update_emotion(
    State(state): State<AppState>,
    me: CurrentUser,
    Json(req): Json<UpdateEmotionRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.approved_member(&me)?;
    Ok(Json(state.emotions.update(&me, &req)?))
}

async fn group_emotions(
    State(state): State<AppState>,
    me: CurrentUser,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.approved_member(&me)?;
    Ok(Json(state.emotions.group_emotions(&me)?))
}

async fn detail(
    State(state): State<AppState>,
    me: CurrentUser,
    Path(emotion_id): Path<u64>,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.approved_member(&me)?;
    Ok(Json(state.emotions.detail(&me, emotion_id)?))
}

async fn update_member_nickname(
    State(state): State<AppState>,
    me: CurrentUser,
    Path(emotion_id): Path<u64>,
    Json(req): Json<UpdateNicknameRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.approved_member(&me)?;
    Ok(Json(state.emotions.update_member_nickname(&me, emotion_id, &req)?))
}
