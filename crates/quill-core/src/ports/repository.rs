use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewPost, Post, PostPatch, User, UserPatch};
use crate::error::RepoError;

/// Generic repository trait shared by every store.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Every record, in persisted (insertion) order.
    async fn list_all(&self) -> Result<Vec<T>, RepoError>;

    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Fails with `NotFound` if it does not exist.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post store.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Validate and persist a new post. Returns the stored record.
    async fn create(&self, draft: NewPost) -> Result<Post, RepoError>;

    /// Posts whose author matches, in persisted order.
    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError>;

    /// Merge a patch into an existing post and refresh its `updated_at`.
    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, RepoError>;
}

/// User store.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Persist a new user. Fails with `DomainError::Duplicate` if the email is taken.
    async fn create(&self, user: User) -> Result<User, RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Merge a patch into an existing user. Email uniqueness is not re-checked.
    async fn update(&self, id: Uuid, patch: UserPatch) -> Result<User, RepoError>;
}
