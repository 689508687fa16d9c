//! Authentication API handlers
//!
//! HTTP endpoints for registration, login, and the current-user profile.

use crate::auth::{CurrentUser, LoginRequest, RegisterRequest, TokenResponse};
use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

/// Registration response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub message: String,
}

/// Register a new account
///
/// New accounts are never administrators; the admin flag cannot be set
/// through this endpoint.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account registered successfully", body = RegisterResponse),
        (status = 400, description = "Invalid input or email already taken", body = crate::error::ApiError),
        (status = 500, description = "Internal server error", body = crate::error::ApiError),
    )
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = state.auth.register(request).await?;

    let response = RegisterResponse {
        id: user.id.unwrap_or_default(),
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        message: "Registration successful".to_string(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with email and password
///
/// Returns a signed access token together with the caller's profile.
/// Unknown email and wrong password produce the same 401.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ApiError),
        (status = 500, description = "Internal server error", body = crate::error::ApiError),
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let response = state.auth.login(request).await?;

    Ok(Json(response))
}

/// Get the current user's profile
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current user profile"),
        (status = 401, description = "Unauthorized", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn me_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    // Re-fetch so the response reflects the stored record, not the token
    let user = state.auth.resolve_subject(&user.email).await?;

    Ok(Json(user.to_public()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_response_serialization() {
        let response = RegisterResponse {
            id: 1,
            email: "test@studio.com".to_string(),
            first_name: "Hugo".to_string(),
            last_name: "Lebolide".to_string(),
            message: "Registration successful".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("test@studio.com"));
        assert!(json.contains("Registration successful"));
    }
}
