//! Repositories over the key-value store.

mod kv_base;
pub mod kv_repo;

pub use kv_base::{KvBaseRepository, StoredRecord};
pub use kv_repo::{KvPostRepository, KvUserRepository, POSTS_KEY, USERS_KEY};
