use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Shortest password accepted at registration, creation or reset.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Access level of an account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(DomainError::Validation(format!("unknown role '{other}'"))),
        }
    }
}

/// User entity - an account whose role gates the admin console.
///
/// `password_hash` holds a salted hash, never the plain password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Partial update of a user. Email uniqueness is not re-checked here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    /// Already hashed.
    pub password_hash: Option<String>,
}

/// The credential-free view of a user. This is the only shape views expose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(
        name: &str,
        email: &str,
        password_hash: String,
        role: Role,
    ) -> Result<Self, DomainError> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name: validate_name(name)?,
            email: validate_email(email)?,
            password_hash,
            role,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn has_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }

    /// Merge a patch. The user is left untouched when validation fails.
    pub fn apply(&mut self, patch: UserPatch) -> Result<(), DomainError> {
        let name = patch.name.as_deref().map(validate_name).transpose()?;
        let email = patch.email.as_deref().map(validate_email).transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(hash) = patch.password_hash {
            self.password_hash = hash;
        }

        self.updated_at = Utc::now().max(self.updated_at);
        Ok(())
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            created_at: self.created_at,
        }
    }
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        user.profile()
    }
}

/// Check a plain password against the length policy before it is hashed.
pub fn validate_password(password: &str) -> Result<(), DomainError> {
    if password.trim().is_empty() {
        return Err(DomainError::Validation("password is required".to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::Validation("name is required".to_string()));
    }
    Ok(name.to_string())
}

fn validate_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(DomainError::Validation("email is required".to_string()));
    }
    if !email.contains('@') {
        return Err(DomainError::Validation("invalid email address".to_string()));
    }
    Ok(email.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_trims_fields() {
        let user = User::new(" Ada ", " ada@example.com ", "hash".into(), Role::Admin).unwrap();

        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
        assert!(user.is_admin());
    }

    #[test]
    fn test_new_user_rejects_bad_email() {
        let result = User::new("Ada", "not-an-email", "hash".into(), Role::User);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_has_email_ignores_case() {
        let user = User::new("Ada", "Ada@Example.com", "hash".into(), Role::User).unwrap();
        assert!(user.has_email("ada@example.com"));
        assert!(!user.has_email("grace@example.com"));
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("secret").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password("      ").is_err());
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_profile_and_debug_hide_credential() {
        let user = User::new("Ada", "ada@example.com", "$argon2id$secret".into(), Role::User)
            .unwrap();

        let json = serde_json::to_string(&user.profile()).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.to_lowercase().contains("password"));
        assert!(!format!("{user:?}").contains("argon2"));
    }

    #[test]
    fn test_apply_patch_keeps_user_on_invalid_email() {
        let mut user = User::new("Ada", "ada@example.com", "hash".into(), Role::User).unwrap();
        let before = user.clone();

        let result = user.apply(UserPatch {
            name: Some("Ada L.".into()),
            email: Some("broken".into()),
            ..UserPatch::default()
        });

        assert!(result.is_err());
        assert_eq!(user, before);
    }
}
