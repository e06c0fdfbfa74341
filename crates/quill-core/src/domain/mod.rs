//! Domain entities - the core business objects.

mod post;
mod user;

pub use post::{EXCERPT_MAX_CHARS, NewPost, Post, PostPatch, derive_excerpt, filter_posts};
pub use user::{MIN_PASSWORD_LEN, Role, User, UserPatch, UserProfile, validate_password};
