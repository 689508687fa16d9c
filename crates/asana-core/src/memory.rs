//! In-memory store implementations
//!
//! Thread-safe stores over `RwLock<HashMap>` with an atomic id sequence.
//! These back the default single-process deployment and every test suite.
//! Writes are last-writer-wins at the store level; callers that need a
//! check-then-mutate sequence to be atomic (the roster engine) serialize it
//! themselves.

use crate::models::{Session, Teacher, User};
use crate::store::{SessionStore, StoreError, TeacherStore, UserStore};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

/// In-memory user store
pub struct InMemoryUserStore {
    users: RwLock<HashMap<i64, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email == email))
    }

    async fn save(&self, mut user: User) -> Result<User, StoreError> {
        let id = match user.id {
            Some(id) => id,
            None => self.next_id.fetch_add(1, Ordering::SeqCst),
        };
        user.id = Some(id);
        user.updated_at = Utc::now();

        let mut users = self.users.write().await;
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        users.remove(&id);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by_key(|u| u.id);
        Ok(all)
    }
}

/// In-memory session store
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<i64, Session>>,
    next_id: AtomicI64,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Session>, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Session>, StoreError> {
        let sessions = self.sessions.read().await;
        let mut all: Vec<Session> = sessions.values().cloned().collect();
        all.sort_by_key(|s| s.id);
        Ok(all)
    }

    async fn save(&self, mut session: Session) -> Result<Session, StoreError> {
        let id = match session.id {
            Some(id) => id,
            None => self.next_id.fetch_add(1, Ordering::SeqCst),
        };
        session.id = Some(id);
        session.updated_at = Utc::now();

        let mut sessions = self.sessions.write().await;
        sessions.insert(id, session.clone());
        Ok(session)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&id);
        Ok(())
    }
}

/// In-memory teacher store, seeded at construction
pub struct InMemoryTeacherStore {
    teachers: RwLock<HashMap<i64, Teacher>>,
}

impl InMemoryTeacherStore {
    /// Create a store holding the given teachers, assigning ids in order
    pub fn with_teachers(teachers: Vec<Teacher>) -> Self {
        let mut map = HashMap::new();
        for (index, mut teacher) in teachers.into_iter().enumerate() {
            let id = index as i64 + 1;
            teacher.id = Some(id);
            map.insert(id, teacher);
        }
        Self {
            teachers: RwLock::new(map),
        }
    }
}

#[async_trait]
impl TeacherStore for InMemoryTeacherStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Teacher>, StoreError> {
        let teachers = self.teachers.read().await;
        Ok(teachers.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Teacher>, StoreError> {
        let teachers = self.teachers.read().await;
        let mut all: Vec<Teacher> = teachers.values().cloned().collect();
        all.sort_by_key(|t| t.id);
        Ok(all)
    }
}
