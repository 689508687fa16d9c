//! Authentication service layer
//!
//! Credential verification, registration, token issuance, and subject
//! resolution. Works against the [`UserStore`] seam; the HTTP layer never
//! touches credentials or the store directly.

use super::password::{hash_password, validate_password_strength, verify_password, PasswordError};
use super::token::{TokenCodec, TokenError};
use asana_core::models::User;
use asana_core::store::{StoreError, UserStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

/// Authentication and authorization failures
///
/// Every operation in this module returns one of these kinds; the API
/// boundary translates them to transport statuses in `crate::error`.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing authorization token")]
    MissingToken,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email is already taken")]
    EmailTaken,

    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    #[error("Account no longer exists")]
    IdentityGone,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// User registration request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 3, max = 20))]
    pub first_name: String,
    #[validate(length(min = 3, max = 20))]
    pub last_name: String,
    #[validate(length(min = 8, max = 40))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Successful login response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub admin: bool,
}

/// Authentication service
///
/// Holds the user store and the token codec; cheap to clone and shared
/// across request handlers through the application state.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    codec: TokenCodec,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, codec: TokenCodec) -> Self {
        Self { users, codec }
    }

    /// Register a new account
    ///
    /// Fails with [`AuthError::EmailTaken`] if the email is already in use.
    /// Accounts created through registration are never administrators.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AuthError> {
        validate_password_strength(&request.password).map_err(AuthError::WeakPassword)?;

        if self.users.exists_by_email(&request.email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::new(
            request.email,
            password_hash,
            request.first_name,
            request.last_name,
        );

        let saved = self.users.save(user).await?;
        tracing::info!(email = %saved.email, "registered new account");

        Ok(saved)
    }

    /// Verify an email/password pair against stored credentials
    ///
    /// Unknown email and wrong password are indistinguishable to the
    /// caller: both fail with [`AuthError::InvalidCredentials`], so a
    /// client cannot probe which addresses have accounts.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                tracing::debug!(email, "login attempt for unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !verify_password(password, &user.password_hash)? {
            tracing::debug!(email, "login attempt with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Authenticate and issue an access token
    pub async fn login(&self, request: LoginRequest) -> Result<TokenResponse, AuthError> {
        let user = self.authenticate(&request.email, &request.password).await?;
        let token = self.codec.issue(&user.email)?;

        tracing::info!(email = %user.email, "login succeeded");

        Ok(TokenResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.codec.ttl_secs(),
            id: user.id.unwrap_or_default(),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            admin: user.admin,
        })
    }

    /// Load the full identity for a verified token subject
    ///
    /// A subject whose token verified but whose account is gone (deleted
    /// after issuance) is an authentication failure, not a server fault.
    pub async fn resolve_subject(&self, email: &str) -> Result<User, AuthError> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::IdentityGone)
    }
}
