//! Data Transfer Objects - form input and statistics shared with the views.

use serde::{Deserialize, Serialize};

/// Quick-create / quick-edit post form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    /// Blank means "derive from content".
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub published: bool,
}

/// Admin create / edit user form.
///
/// On edit, a blank password keeps the current one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: String,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            role: "user".to_string(),
        }
    }
}

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Post counts for an author's dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostStats {
    pub total: usize,
    pub published: usize,
    pub drafts: usize,
}

/// Aggregate counts shown on the admin overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    pub total_posts: usize,
    pub published_posts: usize,
    pub draft_posts: usize,
    pub total_users: usize,
    pub admin_users: usize,
    pub posts_this_month: usize,
}
