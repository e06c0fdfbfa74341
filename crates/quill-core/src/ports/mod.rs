//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;
mod store;

pub use auth::{AuthError, PasswordService};
pub use repository::{BaseRepository, PostRepository, UserRepository};
pub use store::{KeyValueStore, StoreError};
