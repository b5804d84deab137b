//! Family-group routes.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};

use crate::auth::CurrentUser;
use crate::error::DomainError;
use crate::group::service::{
    CreateGroupRequest, DecideJoinRequest, JoinGroupRequest, RenameGroupRequest,
};
use crate::web::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_group))
        .route("/join", post(request_join))
        .route("/join/status", get(my_join_status))
        .route("/join/requests", get(join_requests))
        .route("/join/decide", post(decide_join))
        .route("/name", patch(rename_group))
}

async fn create_group(
    State(state): State<AppState>,
    me: CurrentUser,
    Json(req): Json<CreateGroupRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.current_user(&me)?;
    Ok(Json(state.groups.create_group(&me, &req)?))
}

async fn request_join(
    State(state): State<AppState>,
    me: CurrentUser,
    Json(req): Json<JoinGroupRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.current_user(&me)?;
    Ok(Json(state.groups.request_join(&me, &req)?))
}

async fn my_join_status(
    State(state): State<AppState>,
    me: CurrentUser,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.current_user(&me)?;
    Ok(Json(state.groups.my_join_status(&me)?))
}

async fn join_requests(
    State(state): State<AppState>,
    me: CurrentUser,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.current_user(&me)?;
    Ok(Json(state.groups.join_requests(&me)?))
}

async fn decide_join(
    State(state): State<AppState>,
    me: CurrentUser,
    Json(req): Json<DecideJoinRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.current_user(&me)?;
    Ok(Json(state.groups.decide_join(&me, &req)?))
}

async fn rename_group(
    State(state): State<AppState>,
    me: CurrentUser,
    Json(req): Json<RenameGroupRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let me = state.users.current_user(&me)?;
    Ok(Json(state.groups.rename_group(&me, &req)?))
}
