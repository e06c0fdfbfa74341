//! # Quill Shared
//!
//! Plain data exchanged between the application layer and whatever renders it.

pub mod dto;
pub mod notice;

pub use notice::{Notice, NoticeVariant};
