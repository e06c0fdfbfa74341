//! Key-value repository implementations for posts and users.

use async_trait::async_trait;
use uuid::Uuid;

use quill_core::domain::{NewPost, Post, PostPatch, User, UserPatch};
use quill_core::error::{DomainError, RepoError};
use quill_core::ports::{PostRepository, UserRepository};

use super::kv_base::{KvBaseRepository, StoredRecord};

/// Key holding the serialized list of posts.
pub const POSTS_KEY: &str = "blog_posts";

/// Key holding the serialized list of users.
pub const USERS_KEY: &str = "users";

/// Key-value post repository.
pub type KvPostRepository = KvBaseRepository<Post>;

/// Key-value user repository.
pub type KvUserRepository = KvBaseRepository<User>;

impl StoredRecord for Post {
    const COLLECTION: &'static str = POSTS_KEY;

    fn record_id(&self) -> Uuid {
        self.id
    }
}

impl StoredRecord for User {
    const COLLECTION: &'static str = USERS_KEY;

    fn record_id(&self) -> Uuid {
        self.id
    }
}

#[async_trait]
impl PostRepository for KvPostRepository {
    async fn create(&self, draft: NewPost) -> Result<Post, RepoError> {
        let post = Post::new(draft)?;
        let mut posts = self.load().await?;

        if posts.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Constraint(format!("post {} already exists", post.id)));
        }

        posts.push(post.clone());
        self.persist(&posts).await?;

        tracing::debug!(post_id = %post.id, author_id = %post.author_id, "Post created");
        Ok(post)
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let posts = self.load().await?;
        Ok(posts
            .into_iter()
            .filter(|p| p.is_authored_by(author_id))
            .collect())
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, RepoError> {
        let mut posts = self.load().await?;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;

        post.apply(patch)?;
        let updated = post.clone();
        self.persist(&posts).await?;

        tracing::debug!(post_id = %id, "Post updated");
        Ok(updated)
    }
}

#[async_trait]
impl UserRepository for KvUserRepository {
    async fn create(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.load().await?;

        if users.iter().any(|u| u.has_email(&user.email)) {
            tracing::debug!(user_email = %mask_email(&user.email), "Duplicate email rejected");
            return Err(DomainError::Duplicate(
                "A user with this email already exists".to_string(),
            )
            .into());
        }
        if users.iter().any(|u| u.id == user.id) {
            return Err(RepoError::Constraint(format!("user {} already exists", user.id)));
        }

        users.push(user.clone());
        self.persist(&users).await?;

        tracing::debug!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let users = self.load().await?;
        Ok(users.into_iter().find(|u| u.has_email(email)))
    }

    async fn update(&self, id: Uuid, patch: UserPatch) -> Result<User, RepoError> {
        let mut users = self.load().await?;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(RepoError::NotFound)?;

        user.apply(patch)?;
        let updated = user.clone();
        self.persist(&users).await?;

        tracing::debug!(user_id = %id, "User updated");
        Ok(updated)
    }
}

/// Mask an email for logging to avoid PII in logs.
fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{first}***{domain}"),
                _ => format!("***{domain}"),
            }
        }
        None => "***".to_string(),
    }
}
