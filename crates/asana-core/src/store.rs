//! Persistence seams for the booking system
//!
//! The service core never talks to a concrete backend; it goes through these
//! traits. The in-memory implementations in [`crate::memory`] back the
//! default deployment and the test suites; a relational backend would
//! implement the same traits.

use crate::models::{Session, Teacher, User};
use async_trait::async_trait;

/// Store errors
///
/// Lookup misses are not errors; they surface as `Ok(None)`. This type
/// covers genuine backend faults, which callers treat as fatal.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// User persistence operations
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;

    /// Persist a user; assigns an id to new records and returns the stored
    /// value.
    async fn save(&self, user: User) -> Result<User, StoreError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError>;

    async fn find_all(&self) -> Result<Vec<User>, StoreError>;
}

/// Session persistence operations
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Session>, StoreError>;

    async fn find_all(&self) -> Result<Vec<Session>, StoreError>;

    /// Persist a session; assigns an id to new records and returns the
    /// stored value.
    async fn save(&self, session: Session) -> Result<Session, StoreError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError>;
}

/// Teacher persistence operations (read-only reference data)
#[async_trait]
pub trait TeacherStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Teacher>, StoreError>;

    async fn find_all(&self) -> Result<Vec<Teacher>, StoreError>;
}
