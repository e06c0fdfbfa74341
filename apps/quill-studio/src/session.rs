//! The signed-in user's identity, supplied to every view.

use uuid::Uuid;

use quill_core::domain::{Role, User};

use crate::error::{AppError, AppResult};

/// Authenticated user identity.
///
/// Obtained from [`AuthService`](crate::services::AuthService) on login or
/// registration; dropping it is a logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Fail with `Forbidden` unless the session belongs to an administrator.
    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            return Ok(());
        }
        tracing::warn!(user_id = %self.user_id, "Admin access denied");
        Err(AppError::Forbidden(
            "You don't have permission to access the admin dashboard.".to_string(),
        ))
    }
}

impl From<&User> for Session {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_admin() {
        let admin = User::new("Root", "root@example.com", "h".into(), Role::Admin).unwrap();
        let author = User::new("Ada", "ada@example.com", "h".into(), Role::User).unwrap();

        assert!(Session::from(&admin).require_admin().is_ok());
        assert!(matches!(
            Session::from(&author).require_admin(),
            Err(AppError::Forbidden(_))
        ));
    }
}
