//! Session roster engine
//!
//! Enforces the enrollment invariants: a user appears at most once on a
//! session's roster, join requires both the session and the user to exist,
//! and leave requires current membership. A failed call never persists a
//! partial mutation; changes are applied to a loaded copy and saved only
//! once every check has passed.
//!
//! The load-inspect-save sequence is not atomic across the store boundary,
//! so mutations of the same session are serialized through a per-session
//! lock held for the whole sequence. Mutations of different sessions do not
//! contend.

use asana_core::store::{SessionStore, StoreError, UserStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Roster operation failures
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Session not found")]
    SessionNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("User is already participating in this session")]
    AlreadyJoined,

    #[error("User is not participating in this session")]
    NotParticipating,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Enforces join/leave invariants on session rosters
pub struct RosterEngine {
    sessions: Arc<dyn SessionStore>,
    users: Arc<dyn UserStore>,
    locks: Mutex<HashMap<i64, Arc<tokio::sync::Mutex<()>>>>,
}

impl RosterEngine {
    pub fn new(sessions: Arc<dyn SessionStore>, users: Arc<dyn UserStore>) -> Self {
        Self {
            sessions,
            users,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Enroll a user in a session
    ///
    /// Session and user existence are two independent fail-fast checks,
    /// both performed before the membership check.
    pub async fn join(&self, session_id: i64, user_id: i64) -> Result<(), RosterError> {
        let lock = self.session_lock(session_id);
        let _guard = lock.lock().await;

        let session = self.sessions.find_by_id(session_id).await?;
        let user = self.users.find_by_id(user_id).await?;

        let mut session = session.ok_or(RosterError::SessionNotFound)?;
        if user.is_none() {
            return Err(RosterError::UserNotFound);
        }

        if session.has_participant(user_id) {
            return Err(RosterError::AlreadyJoined);
        }

        session.user_ids.push(user_id);
        self.sessions.save(session).await?;

        tracing::info!(session_id, user_id, "user joined session");
        Ok(())
    }

    /// Remove a user from a session's roster
    ///
    /// Does not re-validate that the user identity still exists: current
    /// membership alone is sufficient grounds for removal, so a roster
    /// entry left behind by a deleted account never becomes unremovable.
    pub async fn leave(&self, session_id: i64, user_id: i64) -> Result<(), RosterError> {
        let lock = self.session_lock(session_id);
        let _guard = lock.lock().await;

        let mut session = self
            .sessions
            .find_by_id(session_id)
            .await?
            .ok_or(RosterError::SessionNotFound)?;

        if !session.has_participant(user_id) {
            return Err(RosterError::NotParticipating);
        }

        session.user_ids.retain(|&id| id != user_id);
        self.sessions.save(session).await?;

        tracing::info!(session_id, user_id, "user left session");
        Ok(())
    }

    /// Get or create the mutation lock for a session
    fn session_lock(&self, session_id: i64) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks
            .entry(session_id)
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }
}
