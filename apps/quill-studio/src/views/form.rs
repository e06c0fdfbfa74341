//! View state shared by every management list: the create/edit form and the
//! two-phase delete confirmation.

use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Which form, if any, is open over a list.
///
/// At most one of creating/editing is active; both return to `Viewing`
/// on successful submit or cancel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState<F> {
    #[default]
    Viewing,
    Creating(F),
    Editing { id: Uuid, form: F },
}

impl<F> FormState<F> {
    pub fn is_viewing(&self) -> bool {
        matches!(self, FormState::Viewing)
    }

    pub fn begin_create(&mut self, form: F) -> AppResult<()> {
        self.ensure_viewing()?;
        *self = FormState::Creating(form);
        Ok(())
    }

    pub fn begin_edit(&mut self, id: Uuid, form: F) -> AppResult<()> {
        self.ensure_viewing()?;
        *self = FormState::Editing { id, form };
        Ok(())
    }

    /// Close any open form without committing it.
    pub fn close(&mut self) {
        *self = FormState::Viewing;
    }

    /// The draft of the open form, for field-by-field editing.
    pub fn draft_mut(&mut self) -> Option<&mut F> {
        match self {
            FormState::Viewing => None,
            FormState::Creating(form) | FormState::Editing { form, .. } => Some(form),
        }
    }

    pub fn draft(&self) -> Option<&F> {
        match self {
            FormState::Viewing => None,
            FormState::Creating(form) | FormState::Editing { form, .. } => Some(form),
        }
    }

    /// Id of the record being edited.
    pub fn editing_id(&self) -> Option<Uuid> {
        match self {
            FormState::Editing { id, .. } => Some(*id),
            _ => None,
        }
    }

    fn ensure_viewing(&self) -> AppResult<()> {
        if self.is_viewing() {
            Ok(())
        } else {
            Err(AppError::InvalidState(
                "Finish or cancel the open form first.".to_string(),
            ))
        }
    }
}

/// Two-phase destructive action: a trigger opens the prompt, a confirm commits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeleteConfirmation {
    #[default]
    Idle,
    Pending(Uuid),
}

impl DeleteConfirmation {
    pub fn request(&mut self, id: Uuid) {
        *self = DeleteConfirmation::Pending(id);
    }

    pub fn dismiss(&mut self) {
        *self = DeleteConfirmation::Idle;
    }

    pub fn pending(&self) -> Option<Uuid> {
        match self {
            DeleteConfirmation::Pending(id) => Some(*id),
            DeleteConfirmation::Idle => None,
        }
    }

    /// The id awaiting confirmation, or `InvalidState` if nothing was requested.
    pub fn target(&self) -> AppResult<Uuid> {
        self.pending().ok_or_else(|| {
            AppError::InvalidState("No delete is awaiting confirmation.".to_string())
        })
    }
}
