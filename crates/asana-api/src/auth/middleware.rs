//! Request authentication gate
//!
//! Extracts and validates the bearer token from the Authorization header,
//! resolves the full identity, and attaches it to request extensions. The
//! [`CurrentUser`] inserted here is the only trusted source of "who is
//! calling" for the rest of request handling.
//!
//! The signing secret comes from the codec held in application state, not
//! from ambient environment lookups; the gate itself is stateless and
//! side-effect-free per call.

use super::service::AuthError;
use crate::error::AppError;
use crate::state::AppState;
use asana_core::models::User;
use axum::{
    body::Body,
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Authenticated identity extracted from a verified token
///
/// Added to request extensions by [`require_auth`] and extracted in
/// handlers with `Extension<CurrentUser>`.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub admin: bool,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id.unwrap_or_default(),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            admin: user.admin,
        }
    }
}

/// Authentication middleware that requires a valid bearer token
///
/// 1. Extracts the Authorization header (`MissingToken` when absent or not
///    `Bearer`-prefixed)
/// 2. Verifies signature and expiration through the token codec
/// 3. Resolves the subject to a live account (`IdentityGone` if the account
///    was deleted after the token was issued)
/// 4. Inserts [`CurrentUser`] into request extensions
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request).ok_or(AuthError::MissingToken)?;

    let subject = state.codec.verify(token).map_err(AuthError::Token)?;
    let user = state.auth.resolve_subject(&subject).await?;

    request.extensions_mut().insert(CurrentUser::from(user));

    Ok(next.run(request).await)
}

fn bearer_token(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_current_user_from_user() {
        let user = User {
            id: Some(42),
            email: "test@studio.com".to_string(),
            first_name: "Hugo".to_string(),
            last_name: "Lebolide".to_string(),
            password_hash: "hash".to_string(),
            admin: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let current = CurrentUser::from(user);

        assert_eq!(current.id, 42);
        assert_eq!(current.email, "test@studio.com");
        assert!(current.admin);
    }

    #[test]
    fn test_bearer_token_extraction() {
        let request = Request::builder()
            .header(header::AUTHORIZATION, "Bearer abc.def.ghi")
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&request), Some("abc.def.ghi"));

        let missing = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(bearer_token(&missing), None);

        let wrong_scheme = Request::builder()
            .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&wrong_scheme), None);
    }
}
