//! The signed-in author's own dashboard.

use quill_shared::dto::PostStats;

use super::posts::{PostBoard, PostScope};
use crate::error::AppResult;
use crate::session::Session;
use crate::state::AppState;

/// An author's view over their own posts. Any signed-in role may open it.
pub struct AuthorDashboard {
    posts: PostBoard,
}

impl AuthorDashboard {
    pub async fn open(state: &AppState, session: Session) -> AppResult<Self> {
        let scope = PostScope::Author(session.user_id);
        let posts = PostBoard::open(state, session, scope).await?;
        Ok(Self { posts })
    }

    pub fn posts(&self) -> &PostBoard {
        &self.posts
    }

    pub fn posts_mut(&mut self) -> &mut PostBoard {
        &mut self.posts
    }

    /// Total, published and draft counts over the author's posts.
    pub fn stats(&self) -> PostStats {
        self.posts.stats()
    }
}
