//! Application state management

use crate::auth::{AuthService, TokenCodec};
use crate::roster::RosterEngine;
use asana_core::config::AppConfig;
use asana_core::memory::{InMemorySessionStore, InMemoryTeacherStore, InMemoryUserStore};
use asana_core::models::Teacher;
use asana_core::store::{SessionStore, TeacherStore, UserStore};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across handlers
///
/// Everything here is constructed once at startup. The token codec holds
/// the signing secret read from configuration; it is never re-read from
/// the environment during request handling.
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Server start time
    pub start_time: Instant,
    /// Request counter
    pub request_count: AtomicU64,
    /// Token codec (shared signing secret + TTL)
    pub codec: TokenCodec,
    /// User persistence
    pub users: Arc<dyn UserStore>,
    /// Session persistence
    pub sessions: Arc<dyn SessionStore>,
    /// Teacher reference data
    pub teachers: Arc<dyn TeacherStore>,
    /// Credential authentication and subject resolution
    pub auth: AuthService,
    /// Roster invariants
    pub roster: RosterEngine,
}

impl AppState {
    /// Create new application state with in-memory stores
    pub fn new(config: AppConfig) -> Self {
        let codec = TokenCodec::new(&config.auth);

        let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
        let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let teachers: Arc<dyn TeacherStore> =
            Arc::new(InMemoryTeacherStore::with_teachers(Self::seed_teachers()));

        let auth = AuthService::new(users.clone(), codec.clone());
        let roster = RosterEngine::new(sessions.clone(), users.clone());

        Self {
            config,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
            codec,
            users,
            sessions,
            teachers,
            auth,
            roster,
        }
    }

    /// Increment request counter
    pub fn increment_requests(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::SeqCst)
    }

    /// Get total request count
    pub fn get_request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    fn seed_teachers() -> Vec<Teacher> {
        vec![
            Teacher::new("Margot".to_string(), "Delahaye".to_string()),
            Teacher::new("Helene".to_string(), "Thiercelin".to_string()),
        ]
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
