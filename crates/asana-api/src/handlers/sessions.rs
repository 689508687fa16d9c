//! Session API handlers
//!
//! CRUD over class sessions plus the two roster operations. All routes
//! here sit behind the authentication gate; the roster invariants live in
//! [`crate::roster`], not in these handlers.

use crate::error::AppError;
use crate::state::AppState;
use asana_core::models::Session;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

/// Session create/update request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SessionRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(max = 2500))]
    pub description: String,
    pub date: DateTime<Utc>,
    pub teacher_id: i64,
}

/// List all sessions
#[utoipa::path(
    get,
    path = "/api/session",
    tag = "session",
    responses(
        (status = 200, description = "All sessions"),
        (status = 401, description = "Unauthorized", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let sessions = state.sessions.find_all().await?;
    Ok(Json(sessions))
}

/// Get a session by id
#[utoipa::path(
    get,
    path = "/api/session/{id}",
    tag = "session",
    params(("id" = i64, Path, description = "Session id")),
    responses(
        (status = 200, description = "The session"),
        (status = 404, description = "Session not found", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let session = state
        .sessions
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Session".to_string()))?;

    Ok(Json(session))
}

/// Create a session
#[utoipa::path(
    post,
    path = "/api/session",
    tag = "session",
    request_body = SessionRequest,
    responses(
        (status = 201, description = "Session created"),
        (status = 400, description = "Invalid input", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if state.teachers.find_by_id(request.teacher_id).await?.is_none() {
        return Err(AppError::BadRequest("Unknown teacher".to_string()));
    }

    let session = Session::new(
        request.name,
        request.description,
        request.date,
        request.teacher_id,
    );
    let saved = state.sessions.save(session).await?;

    tracing::info!(session_id = ?saved.id, name = %saved.name, "session created");

    Ok((StatusCode::CREATED, Json(saved)))
}

/// Update a session
///
/// The roster is carried over untouched; only the descriptive fields and
/// the teacher reference change.
#[utoipa::path(
    put,
    path = "/api/session/{id}",
    tag = "session",
    params(("id" = i64, Path, description = "Session id")),
    request_body = SessionRequest,
    responses(
        (status = 200, description = "Session updated"),
        (status = 404, description = "Session not found", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(request): Json<SessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut session = state
        .sessions
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Session".to_string()))?;

    session.name = request.name;
    session.description = request.description;
    session.date = request.date;
    session.teacher_id = request.teacher_id;

    let saved = state.sessions.save(session).await?;
    Ok(Json(saved))
}

/// Delete a session
///
/// Removing the session implicitly dissolves its roster.
#[utoipa::path(
    delete,
    path = "/api/session/{id}",
    tag = "session",
    params(("id" = i64, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session deleted"),
        (status = 404, description = "Session not found", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if state.sessions.find_by_id(id).await?.is_none() {
        return Err(AppError::NotFound("Session".to_string()));
    }

    state.sessions.delete_by_id(id).await?;
    tracing::info!(session_id = id, "session deleted");

    Ok(StatusCode::OK)
}

/// Enroll the given user in a session
#[utoipa::path(
    post,
    path = "/api/session/{id}/participate/{user_id}",
    tag = "session",
    params(
        ("id" = i64, Path, description = "Session id"),
        ("user_id" = i64, Path, description = "User id"),
    ),
    responses(
        (status = 200, description = "User enrolled"),
        (status = 400, description = "Already participating", body = crate::error::ApiError),
        (status = 404, description = "Session or user not found", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn participate(
    State(state): State<Arc<AppState>>,
    Path((id, user_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    state.roster.join(id, user_id).await?;
    Ok(StatusCode::OK)
}

/// Remove the given user from a session's roster
#[utoipa::path(
    delete,
    path = "/api/session/{id}/participate/{user_id}",
    tag = "session",
    params(
        ("id" = i64, Path, description = "Session id"),
        ("user_id" = i64, Path, description = "User id"),
    ),
    responses(
        (status = 200, description = "User removed from roster"),
        (status = 400, description = "Not participating", body = crate::error::ApiError),
        (status = 404, description = "Session not found", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn no_longer_participate(
    State(state): State<Arc<AppState>>,
    Path((id, user_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    state.roster.leave(id, user_id).await?;
    Ok(StatusCode::OK)
}
