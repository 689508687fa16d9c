//! Authentication and authorization module
//!
//! Components:
//! - Token issuance and verification (`token`)
//! - Password hashing with Argon2 (`password`)
//! - Credential authentication and subject resolution (`service`)
//! - Request authentication gate (`middleware`)
//! - Account ownership guard (`ownership`)

pub mod middleware;
pub mod ownership;
pub mod password;
pub mod service;
pub mod token;

pub use middleware::{require_auth, CurrentUser};
pub use ownership::{authorize_self_delete, OwnershipError};
pub use password::{hash_password, validate_password_strength, verify_password, PasswordError};
pub use service::{AuthError, AuthService, LoginRequest, RegisterRequest, TokenResponse};
pub use token::{Claims, TokenCodec, TokenError};
