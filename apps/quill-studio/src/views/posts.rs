//! Post management list shared by the author dashboard and the admin console.

use std::sync::Arc;

use uuid::Uuid;

use quill_core::domain::{NewPost, Post, PostPatch, filter_posts};
use quill_core::ports::{BaseRepository, PostRepository};
use quill_shared::Notice;
use quill_shared::dto::{PostForm, PostStats};

use super::Toasts;
use super::form::{DeleteConfirmation, FormState};
use crate::error::{AppError, AppResult};
use crate::session::Session;
use crate::state::AppState;

/// Which posts a board manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostScope {
    /// Only posts written by this user.
    Author(Uuid),
    /// Every post (admin).
    All,
}

/// List + search + quick-create/quick-edit + publish toggle + confirmed delete
/// over a scope of posts.
pub struct PostBoard {
    scope: PostScope,
    session: Session,
    repo: Arc<dyn PostRepository>,
    posts: Vec<Post>,
    search: String,
    visible: Vec<Post>,
    form: FormState<PostForm>,
    delete: DeleteConfirmation,
    toasts: Toasts,
}

impl PostBoard {
    /// Load the scope's posts. New posts are attributed to `session`.
    pub async fn open(state: &AppState, session: Session, scope: PostScope) -> AppResult<Self> {
        let mut board = Self {
            scope,
            session,
            repo: state.posts.clone(),
            posts: Vec::new(),
            search: String::new(),
            visible: Vec::new(),
            form: FormState::default(),
            delete: DeleteConfirmation::default(),
            toasts: Toasts::default(),
        };
        board.reload().await?;
        Ok(board)
    }

    pub fn scope(&self) -> PostScope {
        self.scope
    }

    /// Every post in scope, in store order.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Posts matching the current search term.
    pub fn visible(&self) -> &[Post] {
        &self.visible
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.recompute();
    }

    pub fn stats(&self) -> PostStats {
        let published = self.posts.iter().filter(|p| p.published).count();
        PostStats {
            total: self.posts.len(),
            published,
            drafts: self.posts.len() - published,
        }
    }

    pub fn form(&self) -> &FormState<PostForm> {
        &self.form
    }

    pub fn draft_mut(&mut self) -> Option<&mut PostForm> {
        self.form.draft_mut()
    }

    pub fn pending_delete(&self) -> Option<Uuid> {
        self.delete.pending()
    }

    pub fn notices(&self) -> &[Notice] {
        self.toasts.peek()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.toasts.take()
    }

    /// Open the quick-create form with an empty draft.
    pub fn begin_create(&mut self) -> AppResult<()> {
        let result = self.form.begin_create(PostForm::default());
        self.toasts.report(result, |_| None)
    }

    /// Open the quick-edit form prefilled from a post in scope.
    pub fn begin_edit(&mut self, id: Uuid) -> AppResult<()> {
        let result = match self.find(id).map(form_from_post) {
            Ok(form) => self.form.begin_edit(id, form),
            Err(err) => Err(err),
        };
        self.toasts.report(result, |_| None)
    }

    /// Close the open form; nothing is written.
    pub fn cancel(&mut self) {
        self.form.close();
    }

    /// Commit the open form. On failure the form stays open with its draft.
    pub async fn submit(&mut self) -> AppResult<Post> {
        let creating = matches!(self.form, FormState::Creating(_));
        let result = self.submit_form().await;
        self.toasts.report(result, |_| {
            Some(if creating {
                Notice::post_created()
            } else {
                Notice::post_updated()
            })
        })
    }

    /// Flip the publish status directly, without opening a form.
    pub async fn toggle_publish(&mut self, id: Uuid) -> AppResult<Post> {
        let result = self.toggle(id).await;
        self.toasts.report(result, |_| Some(Notice::post_updated()))
    }

    /// First phase of a delete: ask for confirmation.
    pub fn request_delete(&mut self, id: Uuid) -> AppResult<()> {
        let result = self.find(id).map(|_| ());
        if result.is_ok() {
            self.delete.request(id);
        }
        self.toasts.report(result, |_| None)
    }

    pub fn dismiss_delete(&mut self) {
        self.delete.dismiss();
    }

    /// Second phase of a delete: remove the post awaiting confirmation.
    pub async fn confirm_delete(&mut self) -> AppResult<()> {
        let result = self.delete_pending().await;
        self.toasts.report(result, |_| Some(Notice::post_deleted()))
    }

    /// Re-read the scope from the store.
    pub async fn refresh(&mut self) -> AppResult<()> {
        let result = self.reload().await;
        self.toasts.report(result, |_| None)
    }

    async fn submit_form(&mut self) -> AppResult<Post> {
        let saved = match &self.form {
            FormState::Viewing => {
                return Err(AppError::InvalidState("No form is open.".to_string()));
            }
            FormState::Creating(form) => {
                let post = self.repo.create(self.new_post(form)).await?;
                tracing::info!(post_id = %post.id, author_id = %post.author_id, "Post created");
                post
            }
            FormState::Editing { id, form } => self.repo.update(*id, patch_from_form(form)).await?,
        };

        self.form.close();
        self.upsert(saved.clone());
        Ok(saved)
    }

    async fn toggle(&mut self, id: Uuid) -> AppResult<Post> {
        let published = self.find(id)?.published;
        let saved = self.repo.update(id, PostPatch::published(!published)).await?;
        self.upsert(saved.clone());
        Ok(saved)
    }

    async fn delete_pending(&mut self) -> AppResult<()> {
        let id = self.delete.target()?;
        self.repo.delete(id).await?;
        tracing::info!(post_id = %id, deleted_by = %self.session.user_id, "Post deleted");

        self.delete.dismiss();
        if self.form.editing_id() == Some(id) {
            self.form.close();
        }
        self.posts.retain(|p| p.id != id);
        self.recompute();
        Ok(())
    }

    async fn reload(&mut self) -> AppResult<()> {
        self.posts = match self.scope {
            PostScope::Author(author_id) => self.repo.list_by_author(author_id).await?,
            PostScope::All => self.repo.list_all().await?,
        };
        self.recompute();
        Ok(())
    }

    fn upsert(&mut self, post: Post) {
        match self.posts.iter_mut().find(|p| p.id == post.id) {
            Some(slot) => *slot = post,
            None => self.posts.push(post),
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        self.visible = filter_posts(&self.posts, &self.search);
    }

    fn find(&self, id: Uuid) -> AppResult<&Post> {
        self.posts
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound("Post not found.".to_string()))
    }

    fn new_post(&self, form: &PostForm) -> NewPost {
        NewPost {
            title: form.title.clone(),
            content: form.content.clone(),
            excerpt: Some(form.excerpt.clone()),
            published: form.published,
            author_id: self.session.user_id,
            author_name: self.session.name.clone(),
        }
    }
}

fn form_from_post(post: &Post) -> PostForm {
    PostForm {
        title: post.title.clone(),
        content: post.content.clone(),
        excerpt: post.excerpt.clone(),
        published: post.published,
    }
}

// A blank excerpt re-derives it from the (possibly edited) content.
fn patch_from_form(form: &PostForm) -> PostPatch {
    PostPatch {
        title: Some(form.title.clone()),
        content: Some(form.content.clone()),
        excerpt: Some(form.excerpt.clone()),
        published: Some(form.published),
    }
}
