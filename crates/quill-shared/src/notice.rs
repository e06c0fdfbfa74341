//! User-visible transient notifications ("toasts").

use serde::{Deserialize, Serialize};

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVariant {
    Success,
    Destructive,
}

/// Short message reported to the view that triggered an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Success,
        }
    }

    /// A failed action. Every failure is titled "Error".
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }

    pub fn is_error(&self) -> bool {
        self.variant == NoticeVariant::Destructive
    }

    // Common notices
    pub fn post_created() -> Self {
        Self::success("Post created", "The blog post has been created successfully.")
    }

    pub fn post_updated() -> Self {
        Self::success("Post updated", "The blog post has been updated successfully.")
    }

    pub fn post_deleted() -> Self {
        Self::success("Post deleted", "The blog post has been deleted successfully.")
    }

    pub fn user_created() -> Self {
        Self::success("User created", "New user has been created successfully.")
    }

    pub fn user_updated() -> Self {
        Self::success("User updated", "User information has been updated successfully.")
    }

    pub fn user_deleted() -> Self {
        Self::success("User deleted", "The user has been deleted successfully.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_notice_is_destructive() {
        let notice = Notice::error("Please fill in all required fields.");
        assert!(notice.is_error());
        assert_eq!(notice.title, "Error");
    }

    #[test]
    fn test_variant_serializes_lowercase() {
        let json = serde_json::to_string(&Notice::post_created()).unwrap();
        assert!(json.contains("\"variant\":\"success\""));
    }
}
