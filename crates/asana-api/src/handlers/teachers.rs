//! Teacher API handlers
//!
//! Read-only reference data; teachers are seeded at startup.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

pub async fn list_teachers(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let teachers = state.teachers.find_all().await?;
    Ok(Json(teachers))
}

pub async fn get_teacher(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let teacher = state
        .teachers
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Teacher".to_string()))?;

    Ok(Json(teacher))
}
