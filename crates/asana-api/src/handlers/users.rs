//! User API handlers
//!
//! Profile lookup and self-service account deletion. Deletion is guarded
//! by the ownership rule: only the account itself may delete it, admin or
//! not.

use crate::auth::{authorize_self_delete, CurrentUser};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use std::sync::Arc;

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

    Ok(Json(user.to_public()))
}

/// Delete a user account
///
/// Hard delete, no soft-delete. Any token already issued for the account
/// keeps verifying until it expires, but resolution fails afterwards, so
/// the holder is locked out on the next request.
#[utoipa::path(
    delete,
    path = "/api/user/{id}",
    tag = "user",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Account deleted"),
        (status = 403, description = "Not the account owner", body = crate::error::ApiError),
        (status = 404, description = "User not found", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let target = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

    authorize_self_delete(&caller, &target)?;

    state.users.delete_by_id(id).await?;
    tracing::info!(user_id = id, email = %target.email, "account deleted");

    Ok(StatusCode::OK)
}
