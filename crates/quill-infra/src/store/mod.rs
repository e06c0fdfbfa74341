//! Key-value store implementations - JSON files on disk and in-memory fallback.

mod memory;

#[cfg(feature = "file-store")]
mod file;

pub use memory::InMemoryStore;

#[cfg(feature = "file-store")]
pub use file::JsonFileStore;
