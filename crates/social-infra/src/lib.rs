//! # Social Infrastructure
//!
//! Concrete implementations of the ports defined in `social-core`.
//! This crate contains database, media storage and authentication integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM
//! - `auth` - JWT + Argon2 authentication

pub mod database;
pub mod storage;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use database::{DatabaseConfig, InMemoryStore};
pub use storage::{InMemoryMediaStorage, LocalMediaStorage};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
