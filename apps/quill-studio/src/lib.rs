//! # Quill Studio
//!
//! Blogging platform views over the post and user stores: registration and
//! login, the author dashboard and the admin console.

pub mod config;
pub mod error;
pub mod services;
pub mod session;
pub mod state;
pub mod telemetry;
pub mod views;
