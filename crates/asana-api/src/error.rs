//! API error handling
//!
//! Every domain failure kind maps onto exactly one transport status here;
//! handlers and middleware return typed errors and never build responses
//! ad hoc.

use crate::auth::{AuthError, OwnershipError, TokenError};
use crate::roster::RosterError;
use asana_core::store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// API error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Error code
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ApiError::new("NOT_FOUND", format!("{resource} not found")),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg)),
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, ApiError::new("UNAUTHORIZED", msg))
            }
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, ApiError::new("FORBIDDEN", msg)),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", "Internal server error").with_details(msg),
            ),
        };

        (status, Json(error)).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken
            | AuthError::InvalidCredentials
            | AuthError::IdentityGone => AppError::Unauthorized(err.to_string()),
            AuthError::Token(token_err) => token_err.into(),
            AuthError::EmailTaken | AuthError::WeakPassword(_) => {
                AppError::BadRequest(err.to_string())
            }
            AuthError::Password(e) => AppError::Internal(e.to_string()),
            AuthError::Store(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Malformed
            | TokenError::BadSignature
            | TokenError::Expired
            | TokenError::Unsupported => AppError::Unauthorized(err.to_string()),
            TokenError::Encoding(_) | TokenError::Clock(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<RosterError> for AppError {
    fn from(err: RosterError) -> Self {
        match err {
            RosterError::SessionNotFound => AppError::NotFound("Session".to_string()),
            RosterError::UserNotFound => AppError::NotFound("User".to_string()),
            RosterError::AlreadyJoined | RosterError::NotParticipating => {
                AppError::BadRequest(err.to_string())
            }
            RosterError::Store(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<OwnershipError> for AppError {
    fn from(err: OwnershipError) -> Self {
        AppError::Forbidden(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Internal(err.to_string())
    }
}
