#![allow(dead_code)]

use std::sync::Arc;

use quill_infra::{Argon2PasswordService, InMemoryStore};
use quill_shared::dto::RegisterRequest;
use quill_studio::services::AuthService;
use quill_studio::session::Session;
use quill_studio::state::AppState;

pub const ADMIN_EMAIL: &str = "root@example.com";
pub const ADMIN_PASSWORD: &str = "rootpass";

/// Cheap Argon2 parameters keep hashing fast in tests.
pub fn passwords() -> Arc<Argon2PasswordService> {
    Arc::new(Argon2PasswordService::with_cost(1024, 1).unwrap())
}

pub fn memory_state() -> AppState {
    AppState::with_store(Arc::new(InMemoryStore::new()), passwords())
}

pub async fn register(state: &AppState, name: &str, email: &str) -> Session {
    AuthService::new(state)
        .register(RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap()
}

pub async fn admin(state: &AppState) -> Session {
    let user = AuthService::new(state)
        .ensure_admin("Root", ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .unwrap();
    Session::from(&user)
}
