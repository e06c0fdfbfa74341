//! Application services.

mod auth;

pub use auth::AuthService;
