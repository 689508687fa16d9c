//! Token issuance and verification
//!
//! Implements stateless authentication tokens with HMAC-SHA256 signing.
//! A token carries the subject email and a fixed expiration; validity is
//! determined solely by signature and clock at verification time. There is
//! no revocation list: a token stays valid until it expires.

use asana_core::config::AuthConfig;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, SystemTimeError, UNIX_EPOCH};
use thiserror::Error;

/// Claims embedded in an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Token issuer
    pub iss: String,
    /// Subject - the account email
    pub sub: String,
    /// Issued at timestamp (Unix epoch seconds)
    pub iat: u64,
    /// Expiration timestamp (Unix epoch seconds)
    pub exp: u64,
}

/// Token verification and issuance errors
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature does not match")]
    BadSignature,

    #[error("token has expired")]
    Expired,

    #[error("token algorithm is not supported")]
    Unsupported,

    #[error("failed to encode token: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),

    #[error("system clock error: {0}")]
    Clock(#[from] SystemTimeError),
}

/// Signs and verifies access tokens
///
/// Holds the shared signing secret and TTL from [`AuthConfig`], constructed
/// once at startup and never mutated; safe for unsynchronized concurrent
/// reads across request handlers.
#[derive(Clone)]
pub struct TokenCodec {
    secret: String,
    ttl_secs: u64,
    issuer: String,
}

impl TokenCodec {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            ttl_secs: config.token_ttl_secs,
            issuer: config.issuer.clone(),
        }
    }

    /// Issue a signed token for the given subject email
    ///
    /// `iat` is the current time, `exp` is `iat` plus the configured TTL.
    pub fn issue(&self, subject_email: &str) -> Result<String, TokenError> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

        let claims = Claims {
            iss: self.issuer.clone(),
            sub: subject_email.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify a token and return its subject email
    ///
    /// Fails with [`TokenError::Unsupported`] for unsigned ("none"
    /// algorithm) tokens and for any algorithm other than HS256; accepting
    /// an attacker-chosen algorithm would bypass the signature check
    /// entirely, so the header is inspected before any decoding happens.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        if Self::header_algorithm(token)? != Algorithm::HS256 {
            return Err(TokenError::Unsupported);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::BadSignature,
            jsonwebtoken::errors::ErrorKind::InvalidAlgorithm
            | jsonwebtoken::errors::ErrorKind::InvalidAlgorithmName => TokenError::Unsupported,
            _ => TokenError::Malformed,
        })?;

        Ok(token_data.claims.sub)
    }

    /// Token lifetime in seconds, for reporting `expires_in` to clients
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Extract the algorithm named in the token header
    ///
    /// Parsed from the raw header JSON rather than the library's typed
    /// header so that "none" and unknown algorithms are distinguishable
    /// from undecodable garbage.
    fn header_algorithm(token: &str) -> Result<Algorithm, TokenError> {
        let header_segment = token.split('.').next().ok_or(TokenError::Malformed)?;
        let header_bytes = URL_SAFE_NO_PAD
            .decode(header_segment)
            .map_err(|_| TokenError::Malformed)?;
        let header: serde_json::Value =
            serde_json::from_slice(&header_bytes).map_err(|_| TokenError::Malformed)?;

        match header.get("alg").and_then(|alg| alg.as_str()) {
            Some(name) => name.parse().map_err(|_| TokenError::Unsupported),
            None => Err(TokenError::Malformed),
        }
    }
}
