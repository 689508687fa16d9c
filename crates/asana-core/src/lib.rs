//! Asana Core - Domain models, store traits, and shared types
//!
//! This crate defines the abstractions used throughout the asana booking
//! system:
//! - Domain records (users, class sessions, teachers)
//! - Persistence seams (`UserStore`, `SessionStore`, `TeacherStore`)
//! - In-memory store implementations
//! - Configuration management

pub mod config;
pub mod memory;
pub mod models;
pub mod store;

pub use config::{AppConfig, AuthConfig, ConfigError, LoggingConfig, ServerConfig};
pub use memory::{InMemorySessionStore, InMemoryTeacherStore, InMemoryUserStore};
pub use models::{Session, Teacher, User, UserPublic};
pub use store::{SessionStore, StoreError, TeacherStore, UserStore};
