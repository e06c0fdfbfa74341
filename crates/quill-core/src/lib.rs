//! # Quill Core
//!
//! The domain layer of Quill.
//! Posts, users, their validation rules and the ports the infrastructure implements.
//! No storage or runtime dependencies live here.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
