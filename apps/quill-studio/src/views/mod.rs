//! UI-agnostic view state: lists, search, forms and confirmations.
//!
//! Views render nothing. Each action returns its result and records a
//! [`Notice`] for whatever presents the view to pick up.

pub mod admin;
mod dashboard;
mod form;
mod posts;

pub use dashboard::AuthorDashboard;
pub use form::{DeleteConfirmation, FormState};
pub use posts::{PostBoard, PostScope};

use quill_shared::Notice;

use crate::error::AppResult;

/// Queue of notices produced by a view's actions, oldest first.
#[derive(Debug, Default)]
pub struct Toasts {
    pending: Vec<Notice>,
}

impl Toasts {
    /// Record the outcome of an action: the error's notice on failure,
    /// `success(&value)` (if any) on success. The result is passed through.
    pub fn report<T>(
        &mut self,
        result: AppResult<T>,
        success: impl FnOnce(&T) -> Option<Notice>,
    ) -> AppResult<T> {
        match &result {
            Ok(value) => {
                if let Some(notice) = success(value) {
                    self.pending.push(notice);
                }
            }
            Err(err) => self.pending.push(err.notice()),
        }
        result
    }

    pub fn peek(&self) -> &[Notice] {
        &self.pending
    }

    pub fn take(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.pending)
    }
}
