//! API handlers

pub mod auth;
pub mod health;
pub mod sessions;
pub mod teachers;
pub mod users;
