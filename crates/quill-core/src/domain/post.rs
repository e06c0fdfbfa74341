use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Characters kept from the content when an excerpt is derived.
pub const EXCERPT_MAX_CHARS: usize = 150;

const ELLIPSIS: &str = "...";
const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Post entity - a unit of authored content with a publish status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub published: bool,
    pub author_id: Uuid,
    /// Snapshot of the author's display name when the post was created.
    /// Not refreshed when the user is renamed.
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a post.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    /// Derived from the content when absent or blank.
    pub excerpt: Option<String>,
    pub published: bool,
    pub author_id: Uuid,
    pub author_name: String,
}

/// Partial update of a post. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub published: Option<bool>,
}

impl PostPatch {
    /// Patch that only changes the publish status.
    pub fn published(published: bool) -> Self {
        Self {
            published: Some(published),
            ..Self::default()
        }
    }
}

impl Post {
    /// Validate the draft and build a post with a fresh id and timestamps.
    pub fn new(draft: NewPost) -> Result<Self, DomainError> {
        let title = required("title", &draft.title)?;
        let content = required("content", &draft.content)?;
        let excerpt = match draft.excerpt.as_deref().map(str::trim) {
            Some(excerpt) if !excerpt.is_empty() => excerpt.to_string(),
            _ => excerpt_or_title(&content, &title),
        };
        let author_name = match draft.author_name.trim() {
            "" => ANONYMOUS_AUTHOR.to_string(),
            name => name.to_string(),
        };

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title,
            content,
            excerpt,
            published: draft.published,
            author_id: draft.author_id,
            author_name,
            created_at: now,
            updated_at: now,
        })
    }

    /// Merge a patch into the post and refresh `updated_at`.
    ///
    /// The post is left untouched when the patch fails validation.
    pub fn apply(&mut self, patch: PostPatch) -> Result<(), DomainError> {
        let title = patch
            .title
            .as_deref()
            .map(|t| required("title", t))
            .transpose()?;
        let content = patch
            .content
            .as_deref()
            .map(|c| required("content", c))
            .transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(content) = content {
            self.content = content;
        }
        if let Some(excerpt) = patch.excerpt {
            self.excerpt = match excerpt.trim() {
                "" => excerpt_or_title(&self.content, &self.title),
                excerpt => excerpt.to_string(),
            };
        }
        if let Some(published) = patch.published {
            self.published = published;
        }

        self.touch();
        Ok(())
    }

    /// Advance `updated_at`; it always moves strictly forward.
    pub fn touch(&mut self) {
        let floor = self.updated_at + TimeDelta::nanoseconds(1);
        self.updated_at = Utc::now().max(floor);
    }

    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }

    /// Case-insensitive match against title, excerpt and author name.
    /// `needle` must already be lowercase.
    fn matches_lowercase(&self, needle: &str) -> bool {
        [&self.title, &self.excerpt, &self.author_name]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Filter posts by a search term. A blank term keeps every post.
pub fn filter_posts(posts: &[Post], term: &str) -> Vec<Post> {
    let term = term.trim();
    if term.is_empty() {
        return posts.to_vec();
    }

    let needle = term.to_lowercase();
    posts
        .iter()
        .filter(|post| post.matches_lowercase(&needle))
        .cloned()
        .collect()
}

/// Strip markup tags from `content` and cut it to [`EXCERPT_MAX_CHARS`],
/// appending `...` when something was cut.
pub fn derive_excerpt(content: &str) -> String {
    truncate(strip_tags(content).trim())
}

// Content made only of markup has no text to summarize; the title always does.
fn excerpt_or_title(content: &str, title: &str) -> String {
    let excerpt = derive_excerpt(content);
    if excerpt.is_empty() {
        truncate(title)
    } else {
        excerpt
    }
}

fn truncate(plain: &str) -> String {
    if plain.chars().count() > EXCERPT_MAX_CHARS {
        let mut excerpt: String = plain.chars().take(EXCERPT_MAX_CHARS).collect();
        excerpt.push_str(ELLIPSIS);
        excerpt
    } else {
        plain.to_string()
    }
}

/// Remove every `<...>` run. A `<` with no closing `>` is kept as text.
fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                out.push_str(&rest[open..]);
                return out;
            }
        }
    }

    out.push_str(rest);
    out
}

fn required(field: &str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}
