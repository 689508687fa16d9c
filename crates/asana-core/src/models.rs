//! Domain models for the booking system
//!
//! This module defines the core data structures:
//! - User: an account that can authenticate and enroll in sessions
//! - Session: a scheduled class offering with a participant roster
//! - Teacher: read-only reference data describing who leads a session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account model
///
/// Represents an account in the booking system with its credentials and
/// profile information. The email is unique and serves as the login subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier (assigned by the store)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// User's email address (unique, used for login)
    pub email: String,

    /// User's first name
    pub first_name: String,

    /// User's last name
    pub last_name: String,

    /// Hashed password (Argon2id)
    /// This field is never serialized in API responses
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Whether the user has administrative privileges
    #[serde(default)]
    pub admin: bool,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the given credentials
    ///
    /// Accounts created this way are never administrators; the admin flag
    /// can only be granted through out-of-band provisioning.
    pub fn new(email: String, password_hash: String, first_name: String, last_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: None, // Set by the store
            email,
            first_name,
            last_name,
            password_hash,
            admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Convert user to public representation (without sensitive fields)
    pub fn to_public(&self) -> UserPublic {
        UserPublic {
            id: self.id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            admin: self.admin,
            created_at: self.created_at,
        }
    }
}

/// Public user representation (safe for API responses)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: Option<i64>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
}

/// Class session model
///
/// A scheduled class offering. The `user_ids` list is the enrollment roster;
/// it is mutated exclusively through the roster engine, which guarantees a
/// given user id appears at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (assigned by the store)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Display name of the class
    pub name: String,

    /// Free-form description
    pub description: String,

    /// When the class takes place
    pub date: DateTime<Utc>,

    /// Teacher leading the session (reference, not ownership)
    pub teacher_id: i64,

    /// Enrolled user ids, insertion-ordered, no duplicates
    #[serde(default)]
    pub user_ids: Vec<i64>,

    /// Record creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session with an empty roster
    pub fn new(name: String, description: String, date: DateTime<Utc>, teacher_id: i64) -> Self {
        let now = Utc::now();
        Self {
            id: None, // Set by the store
            name,
            description,
            date,
            teacher_id,
            user_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether a user is on the roster
    pub fn has_participant(&self, user_id: i64) -> bool {
        self.user_ids.contains(&user_id)
    }
}

/// Teacher model
///
/// Read-only reference data; teachers are seeded at startup and never
/// mutated through this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Teacher {
    pub fn new(first_name: String, last_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            first_name,
            last_name,
            created_at: now,
            updated_at: now,
        }
    }
}
