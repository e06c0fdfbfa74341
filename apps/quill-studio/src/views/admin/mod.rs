//! Admin console: overview statistics plus global post and user management.

mod users;

pub use users::UsersPanel;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

use quill_core::domain::{Post, Role, UserProfile};
use quill_shared::dto::Overview;

use super::posts::{PostBoard, PostScope};
use crate::error::{AppError, AppResult};
use crate::session::Session;
use crate::state::AppState;

/// Console section. Switching sections leaves every form and confirmation
/// untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AdminSection {
    #[default]
    Overview,
    Posts,
    Users,
    Settings,
}

impl AdminSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminSection::Overview => "overview",
            AdminSection::Posts => "posts",
            AdminSection::Users => "users",
            AdminSection::Settings => "settings",
        }
    }
}

impl fmt::Display for AdminSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminSection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overview" => Ok(AdminSection::Overview),
            "posts" => Ok(AdminSection::Posts),
            "users" => Ok(AdminSection::Users),
            "settings" => Ok(AdminSection::Settings),
            other => Err(AppError::NotFound(format!("unknown section '{other}'"))),
        }
    }
}

/// One line of the user listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub profile: UserProfile,
    /// Posts currently attributed to this user.
    pub post_count: usize,
}

pub struct AdminDashboard {
    session: Session,
    section: AdminSection,
    posts: PostBoard,
    users: UsersPanel,
}

impl AdminDashboard {
    /// Open the console. Only administrators may do this.
    pub async fn open(state: &AppState, session: Session) -> AppResult<Self> {
        session.require_admin()?;

        let posts = PostBoard::open(state, session.clone(), PostScope::All).await?;
        let users = UsersPanel::open(state, session.clone()).await?;
        tracing::debug!(user_id = %session.user_id, "Admin dashboard opened");

        Ok(Self {
            session,
            section: AdminSection::default(),
            posts,
            users,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn section(&self) -> AdminSection {
        self.section
    }

    pub fn select(&mut self, section: AdminSection) {
        self.section = section;
    }

    /// Statistics over the lists as currently loaded.
    pub fn overview(&self) -> Overview {
        self.overview_at(Utc::now())
    }

    pub fn overview_at(&self, now: DateTime<Utc>) -> Overview {
        compute_overview(self.posts.posts(), self.users.profiles(), now)
    }

    /// The user listing with post counts taken from the posts section as
    /// currently loaded, so post changes show up without a refresh.
    pub fn user_rows(&self) -> Vec<UserRow> {
        user_rows(self.users.profiles(), self.posts.posts())
    }

    pub fn posts(&self) -> &PostBoard {
        &self.posts
    }

    pub fn posts_mut(&mut self) -> &mut PostBoard {
        &mut self.posts
    }

    pub fn users(&self) -> &UsersPanel {
        &self.users
    }

    pub fn users_mut(&mut self) -> &mut UsersPanel {
        &mut self.users
    }

    /// Reload both sections from the store.
    pub async fn refresh(&mut self) -> AppResult<()> {
        self.posts.refresh().await?;
        self.users.refresh().await
    }
}

/// Aggregate counts. "This month" is `now`'s calendar month in UTC.
pub fn compute_overview(posts: &[Post], users: &[UserProfile], now: DateTime<Utc>) -> Overview {
    let published_posts = posts.iter().filter(|p| p.published).count();
    let posts_this_month = posts
        .iter()
        .filter(|p| p.created_at.year() == now.year() && p.created_at.month() == now.month())
        .count();

    Overview {
        total_posts: posts.len(),
        published_posts,
        draft_posts: posts.len() - published_posts,
        total_users: users.len(),
        admin_users: users.iter().filter(|u| u.role == Role::Admin).count(),
        posts_this_month,
    }
}

pub fn user_rows(users: &[UserProfile], posts: &[Post]) -> Vec<UserRow> {
    let mut counts: HashMap<Uuid, usize> = HashMap::new();
    for post in posts {
        *counts.entry(post.author_id).or_insert(0) += 1;
    }

    users
        .iter()
        .map(|profile| UserRow {
            profile: profile.clone(),
            post_count: counts.get(&profile.id).copied().unwrap_or(0),
        })
        .collect()
}
