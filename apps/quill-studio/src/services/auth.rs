//! Account service - registration, login and account creation.

use std::sync::Arc;

use quill_core::domain::{Role, User, validate_password};
use quill_core::ports::{AuthError, PasswordService, UserRepository};
use quill_shared::dto::{LoginRequest, RegisterRequest};

use crate::error::{AppError, AppResult};
use crate::session::Session;
use crate::state::AppState;

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl AuthService {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: state.users.clone(),
            passwords: state.passwords.clone(),
        }
    }

    /// Self-service sign-up. New accounts always get the `user` role.
    pub async fn register(&self, req: RegisterRequest) -> AppResult<Session> {
        let user = self
            .create_account(&req.name, &req.email, &req.password, Role::User)
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(Session::from(&user))
    }

    pub async fn login(&self, req: LoginRequest) -> AppResult<Session> {
        let user = self
            .users
            .find_by_email(&req.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.passwords.verify(&req.password, &user.password_hash)? {
            tracing::warn!(user_id = %user.id, "Login rejected");
            return Err(AuthError::InvalidCredentials.into());
        }

        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");
        Ok(Session::from(&user))
    }

    /// Validate, hash and store a new account. Duplicate emails are a `Conflict`.
    pub async fn create_account(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> AppResult<User> {
        // Field checks first so a bad form never pays for a hash
        let draft = User::new(name, email, String::new(), role)?;
        let password_hash = self.hash_password(password)?;

        let user = User {
            password_hash,
            ..draft
        };
        Ok(self.users.create(user).await?)
    }

    /// Enforce the password policy and return a fresh salted hash.
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        validate_password(password)?;
        Ok(self.passwords.hash(password)?)
    }

    /// Make sure an administrator with this email exists, creating it if needed.
    ///
    /// Fails with `Conflict` if the email belongs to a non-admin account.
    pub async fn ensure_admin(&self, name: &str, email: &str, password: &str) -> AppResult<User> {
        if let Some(existing) = self.users.find_by_email(email).await? {
            if !existing.is_admin() {
                tracing::warn!(user_id = %existing.id, "Bootstrap admin email belongs to a non-admin account");
                return Err(AppError::Conflict(
                    "The administrator email belongs to a non-admin account.".to_string(),
                ));
            }
            return Ok(existing);
        }

        let admin = self.create_account(name, email, password, Role::Admin).await?;
        tracing::info!(user_id = %admin.id, "Bootstrap administrator created");
        Ok(admin)
    }
}
