//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the key-value stores, the repositories built on them
//! and password hashing.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory store only, no hashing
//! - `file-store` - JSON file-per-key store on local disk
//! - `auth` - Argon2 password hashing

pub mod repository;
pub mod store;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports
pub use repository::{KvPostRepository, KvUserRepository};
pub use store::InMemoryStore;

#[cfg(feature = "file-store")]
pub use store::JsonFileStore;

#[cfg(feature = "auth")]
pub use auth::Argon2PasswordService;
