//! Users section of the admin console.

use std::sync::Arc;

use uuid::Uuid;

use quill_core::domain::{Role, UserPatch, UserProfile};
use quill_core::ports::{BaseRepository, UserRepository};
use quill_shared::Notice;
use quill_shared::dto::UserForm;

use crate::error::{AppError, AppResult};
use crate::services::AuthService;
use crate::session::Session;
use crate::state::AppState;
use crate::views::{DeleteConfirmation, FormState, Toasts};

pub struct UsersPanel {
    session: Session,
    users: Arc<dyn UserRepository>,
    auth: AuthService,
    profiles: Vec<UserProfile>,
    form: FormState<UserForm>,
    delete: DeleteConfirmation,
    toasts: Toasts,
}

impl UsersPanel {
    pub(crate) async fn open(state: &AppState, session: Session) -> AppResult<Self> {
        let mut panel = Self {
            session,
            users: state.users.clone(),
            auth: AuthService::new(state),
            profiles: Vec::new(),
            form: FormState::default(),
            delete: DeleteConfirmation::default(),
            toasts: Toasts::default(),
        };
        panel.reload().await?;
        Ok(panel)
    }

    /// Every user, in store order.
    pub fn profiles(&self) -> &[UserProfile] {
        &self.profiles
    }

    pub fn form(&self) -> &FormState<UserForm> {
        &self.form
    }

    pub fn draft_mut(&mut self) -> Option<&mut UserForm> {
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

    pub fn begin_create(&mut self) -> AppResult<()> {
        let result = self.form.begin_create(UserForm::default());
        self.toasts.report(result, |_| None)
    }

    /// Open the edit form prefilled from a listed user. The password starts
    /// blank, meaning "keep the current one".
    pub fn begin_edit(&mut self, id: Uuid) -> AppResult<()> {
        let result = match self.find(id).map(form_from_profile) {
            Ok(form) => self.form.begin_edit(id, form),
            Err(err) => Err(err),
        };
        self.toasts.report(result, |_| None)
    }

    pub fn cancel(&mut self) {
        self.form.close();
    }

    /// Commit the open form. On failure the form stays open with its draft.
    pub async fn submit(&mut self) -> AppResult<UserProfile> {
        let creating = matches!(self.form, FormState::Creating(_));
        let result = self.submit_form().await;
        self.toasts.report(result, |_| {
            Some(if creating {
                Notice::user_created()
            } else {
                Notice::user_updated()
            })
        })
    }

    /// Change a user's role without opening the form.
    pub async fn set_role(&mut self, id: Uuid, role: Role) -> AppResult<UserProfile> {
        let result = self.change_role(id, role).await;
        self.toasts.report(result, |_| Some(Notice::user_updated()))
    }

    /// First phase of a delete. The signed-in admin's own account is refused.
    pub fn request_delete(&mut self, id: Uuid) -> AppResult<()> {
        let result = self.ensure_not_self(id).and_then(|()| self.find(id).map(|_| ()));
        if result.is_ok() {
            self.delete.request(id);
        }
        self.toasts.report(result, |_| None)
    }

    pub fn dismiss_delete(&mut self) {
        self.delete.dismiss();
    }

    /// Delete the user awaiting confirmation. Their posts are kept.
    pub async fn confirm_delete(&mut self) -> AppResult<()> {
        let result = self.delete_pending().await;
        self.toasts.report(result, |_| Some(Notice::user_deleted()))
    }

    /// Re-read users from the store.
    pub async fn refresh(&mut self) -> AppResult<()> {
        let result = self.reload().await;
        self.toasts.report(result, |_| None)
    }

    async fn submit_form(&mut self) -> AppResult<UserProfile> {
        let saved = match &self.form {
            FormState::Viewing => {
                return Err(AppError::InvalidState("No form is open.".to_string()));
            }
            FormState::Creating(form) => {
                let role: Role = form.role.parse()?;
                let user = self
                    .auth
                    .create_account(&form.name, &form.email, &form.password, role)
                    .await?;
                tracing::info!(user_id = %user.id, created_by = %self.session.user_id, "User created by admin");
                user
            }
            FormState::Editing { id, form } => {
                let role: Role = form.role.parse()?;
                self.ensure_keeps_admin(*id, role)?;
                let password_hash = if form.password.is_empty() {
                    None
                } else {
                    Some(self.auth.hash_password(&form.password)?)
                };
                let patch = UserPatch {
                    name: Some(form.name.clone()),
                    email: Some(form.email.clone()),
                    role: Some(role),
                    password_hash,
                };
                self.users.update(*id, patch).await?
            }
        };

        self.form.close();
        let profile = saved.profile();
        self.upsert(profile.clone());
        Ok(profile)
    }

    async fn change_role(&mut self, id: Uuid, role: Role) -> AppResult<UserProfile> {
        self.find(id)?;
        self.ensure_keeps_admin(id, role)?;

        let patch = UserPatch {
            role: Some(role),
            ..UserPatch::default()
        };
        let profile = self.users.update(id, patch).await?.profile();
        tracing::info!(user_id = %id, role = %role, "User role changed");
        self.upsert(profile.clone());
        Ok(profile)
    }

    async fn delete_pending(&mut self) -> AppResult<()> {
        let id = self.delete.target()?;
        self.ensure_not_self(id)?;
        self.users.delete(id).await?;
        tracing::info!(user_id = %id, deleted_by = %self.session.user_id, "User deleted");

        self.delete.dismiss();
        if self.form.editing_id() == Some(id) {
            self.form.close();
        }
        self.profiles.retain(|p| p.id != id);
        Ok(())
    }

    async fn reload(&mut self) -> AppResult<()> {
        let users = self.users.list_all().await?;
        self.profiles = users.iter().map(|user| user.profile()).collect();
        Ok(())
    }

    fn upsert(&mut self, profile: UserProfile) {
        match self.profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(slot) => *slot = profile,
            None => self.profiles.push(profile),
        }
    }

    fn find(&self, id: Uuid) -> AppResult<&UserProfile> {
        self.profiles
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound("User not found.".to_string()))
    }

    fn ensure_not_self(&self, id: Uuid) -> AppResult<()> {
        if id == self.session.user_id {
            return Err(AppError::Forbidden(
                "You can't delete your own account.".to_string(),
            ));
        }
        Ok(())
    }

    // An admin may not demote themselves.
    fn ensure_keeps_admin(&self, id: Uuid, role: Role) -> AppResult<()> {
        if id == self.session.user_id && role != Role::Admin {
            return Err(AppError::Forbidden(
                "You can't remove your own admin role.".to_string(),
            ));
        }
        Ok(())
    }
}

fn form_from_profile(profile: &UserProfile) -> UserForm {
    UserForm {
        name: profile.name.clone(),
        email: profile.email.clone(),
        password: String::new(),
        role: profile.role.to_string(),
    }
}
