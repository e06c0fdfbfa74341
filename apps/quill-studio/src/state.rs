//! Application state - the stores and services injected into every view.

use std::sync::Arc;

use quill_core::ports::{KeyValueStore, PasswordService, PostRepository, UserRepository};
use quill_infra::{Argon2PasswordService, InMemoryStore, JsonFileStore, KvPostRepository, KvUserRepository};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub users: Arc<dyn UserRepository>,
    pub passwords: Arc<dyn PasswordService>,
}

impl AppState {
    /// Build the application state with the configured store.
    pub async fn new(config: &AppConfig) -> AppResult<Self> {
        let store: Arc<dyn KeyValueStore> = match &config.data_dir {
            Some(dir) => {
                let store = JsonFileStore::open(dir)
                    .await
                    .map_err(|e| AppError::Internal(e.to_string()))?;
                Arc::new(store)
            }
            None => {
                tracing::warn!("QUILL_DATA_DIR not set. Running with an in-memory store; data is lost on exit.");
                Arc::new(InMemoryStore::new())
            }
        };

        let state = Self::with_store(store, Arc::new(Argon2PasswordService::new()));
        tracing::info!("Application state initialized");
        Ok(state)
    }

    /// Wire both repositories over one key-value store.
    pub fn with_store(store: Arc<dyn KeyValueStore>, passwords: Arc<dyn PasswordService>) -> Self {
        Self {
            posts: Arc::new(KvPostRepository::new(store.clone())),
            users: Arc::new(KvUserRepository::new(store)),
            passwords,
        }
    }
}
