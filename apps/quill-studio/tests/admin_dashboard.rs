mod common;

use chrono::Utc;
use uuid::Uuid;

use quill_core::domain::{NewPost, Role};
use quill_core::ports::{BaseRepository, PostRepository, UserRepository};
use quill_shared::Notice;
use quill_shared::dto::{LoginRequest, UserForm};
use quill_studio::error::AppError;
use quill_studio::services::AuthService;
use quill_studio::session::Session;
use quill_studio::state::AppState;
use quill_studio::views::FormState;
use quill_studio::views::admin::{AdminDashboard, AdminSection};

use common::{ADMIN_EMAIL, admin, memory_state, register};

async fn seed_post(state: &AppState, author: &Session, title: &str, published: bool) {
    state
        .posts
        .create(NewPost {
            title: title.to_string(),
            content: "Body".to_string(),
            published,
            author_id: author.user_id,
            author_name: author.name.clone(),
            ..NewPost::default()
        })
        .await
        .unwrap();
}

fn post_count(dashboard: &AdminDashboard, id: Uuid) -> Option<usize> {
    dashboard
        .user_rows()
        .into_iter()
        .find(|row| row.profile.id == id)
        .map(|row| row.post_count)
}

fn user_form(name: &str, email: &str, password: &str, role: &str) -> UserForm {
    UserForm {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        role: role.to_string(),
    }
}

async fn create_user(dashboard: &mut AdminDashboard, form: UserForm) -> Result<(), AppError> {
    let users = dashboard.users_mut();
    users.begin_create()?;
    *users.draft_mut().unwrap() = form;
    users.submit().await.map(|_| ())
}

#[tokio::test]
async fn test_non_admin_is_forbidden() {
    let state = memory_state();
    let author = register(&state, "Ada", "ada@example.com").await;

    let result = AdminDashboard::open(&state, author).await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn test_overview_counts() {
    let state = memory_state();
    let root = admin(&state).await;
    let ada = register(&state, "Ada", "ada@example.com").await;
    seed_post(&state, &ada, "One", true).await;
    seed_post(&state, &ada, "Two", false).await;
    seed_post(&state, &root, "Three", true).await;

    let dashboard = AdminDashboard::open(&state, root).await.unwrap();
    let overview = dashboard.overview_at(Utc::now());

    assert_eq!(overview.total_posts, 3);
    assert_eq!(overview.published_posts, 2);
    assert_eq!(overview.draft_posts, 1);
    assert_eq!(overview.total_users, 2);
    assert_eq!(overview.admin_users, 1);
    assert_eq!(overview.posts_this_month, 3);
}

#[tokio::test]
async fn test_sections_do_not_disturb_open_forms() {
    let state = memory_state();
    let root = admin(&state).await;
    let mut dashboard = AdminDashboard::open(&state, root).await.unwrap();
    assert_eq!(dashboard.section(), AdminSection::Overview);

    dashboard.posts_mut().begin_create().unwrap();
    dashboard.select(AdminSection::Users);
    dashboard.select("settings".parse().unwrap());

    assert_eq!(dashboard.section(), AdminSection::Settings);
    assert!(matches!(dashboard.posts().form(), FormState::Creating(_)));
}

#[tokio::test]
async fn test_admin_quick_create_attributes_post_to_admin() {
    let state = memory_state();
    let root = admin(&state).await;
    let mut dashboard = AdminDashboard::open(&state, root.clone()).await.unwrap();

    let posts = dashboard.posts_mut();
    posts.begin_create().unwrap();
    let draft = posts.draft_mut().unwrap();
    draft.title = "Announcement".to_string();
    draft.content = "<h1>Welcome</h1>".to_string();
    draft.published = true;
    let post = posts.submit().await.unwrap();

    assert_eq!(post.author_id, root.user_id);
    assert_eq!(post.author_name, "Root");
    assert_eq!(post.excerpt, "Welcome");
    assert_eq!(dashboard.overview().published_posts, 1);
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let state = memory_state();
    let root = admin(&state).await;
    let mut dashboard = AdminDashboard::open(&state, root).await.unwrap();

    create_user(&mut dashboard, user_form("A", "a@x.com", "secret1", "user"))
        .await
        .unwrap();
    let result = create_user(&mut dashboard, user_form("B", "A@X.com", "secret2", "user")).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    let users = dashboard.users_mut();
    assert!(matches!(users.form(), FormState::Creating(form) if form.name == "B"));
    assert_eq!(users.take_notices().last().unwrap().title, "Error");
    assert_eq!(state.users.list_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_created_user_can_log_in_with_role() {
    let state = memory_state();
    let root = admin(&state).await;
    let mut dashboard = AdminDashboard::open(&state, root).await.unwrap();

    create_user(&mut dashboard, user_form("Eve", "eve@example.com", "secret1", "admin"))
        .await
        .unwrap();

    let session = AuthService::new(&state)
        .login(LoginRequest {
            email: "eve@example.com".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(session.role, Role::Admin);
    assert_eq!(dashboard.users_mut().take_notices(), vec![Notice::user_created()]);
    assert_eq!(dashboard.overview().admin_users, 2);
}

#[tokio::test]
async fn test_unknown_role_is_a_validation_error() {
    let state = memory_state();
    let root = admin(&state).await;
    let mut dashboard = AdminDashboard::open(&state, root).await.unwrap();

    let result = create_user(&mut dashboard, user_form("Eve", "eve@example.com", "secret1", "owner")).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_edit_with_blank_password_keeps_current_one() {
    let state = memory_state();
    let root = admin(&state).await;
    let ada = register(&state, "Ada", "ada@example.com").await;
    let mut dashboard = AdminDashboard::open(&state, root).await.unwrap();
    let before = state.users.find_by_id(ada.user_id).await.unwrap().unwrap();

    let users = dashboard.users_mut();
    users.begin_edit(ada.user_id).unwrap();
    let draft = users.draft_mut().unwrap();
    assert!(draft.password.is_empty());
    assert_eq!(draft.role, "user");
    draft.name = "Ada Lovelace".to_string();
    let profile = users.submit().await.unwrap();

    let after = state.users.find_by_id(ada.user_id).await.unwrap().unwrap();
    assert_eq!(profile.name, "Ada Lovelace");
    assert_eq!(after.password_hash, before.password_hash);
    assert_eq!(after.created_at, before.created_at);
}

#[tokio::test]
async fn test_edit_with_new_password_rehashes() {
    let state = memory_state();
    let root = admin(&state).await;
    let ada = register(&state, "Ada", "ada@example.com").await;
    let mut dashboard = AdminDashboard::open(&state, root).await.unwrap();

    let users = dashboard.users_mut();
    users.begin_edit(ada.user_id).unwrap();
    users.draft_mut().unwrap().password = "123".to_string();
    assert!(matches!(users.submit().await, Err(AppError::Validation(_))));

    users.draft_mut().unwrap().password = "newsecret".to_string();
    users.submit().await.unwrap();

    let auth = AuthService::new(&state);
    let login = |password: &str| LoginRequest {
        email: "ada@example.com".to_string(),
        password: password.to_string(),
    };
    assert!(auth.login(login("secret1")).await.is_err());
    assert!(auth.login(login("newsecret")).await.is_ok());
}

#[tokio::test]
async fn test_admin_deletes_another_user_but_not_themself() {
    let state = memory_state();
    let root = admin(&state).await;
    let ada = register(&state, "Ada", "ada@example.com").await;
    seed_post(&state, &ada, "Still here", true).await;
    let mut dashboard = AdminDashboard::open(&state, root.clone()).await.unwrap();

    let users = dashboard.users_mut();
    assert!(matches!(
        users.request_delete(root.user_id),
        Err(AppError::Forbidden(_))
    ));
    assert_eq!(users.pending_delete(), None);

    users.request_delete(ada.user_id).unwrap();
    users.confirm_delete().await.unwrap();

    assert!(state.users.find_by_id(ada.user_id).await.unwrap().is_none());
    assert!(state.users.find_by_email(ADMIN_EMAIL).await.unwrap().is_some());
    assert_eq!(users.profiles().len(), 1);
    assert_eq!(users.take_notices().last(), Some(&Notice::user_deleted()));
    assert_eq!(state.posts.list_by_author(ada.user_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_role_changes() {
    let state = memory_state();
    let root = admin(&state).await;
    let ada = register(&state, "Ada", "ada@example.com").await;
    let mut dashboard = AdminDashboard::open(&state, root.clone()).await.unwrap();

    let users = dashboard.users_mut();
    assert!(matches!(
        users.set_role(root.user_id, Role::User).await,
        Err(AppError::Forbidden(_))
    ));

    let promoted = users.set_role(ada.user_id, Role::Admin).await.unwrap();
    assert_eq!(promoted.role, Role::Admin);
    assert_eq!(dashboard.overview().admin_users, 2);

    let session = AuthService::new(&state)
        .login(LoginRequest {
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();
    assert!(AdminDashboard::open(&state, session).await.is_ok());
}

#[tokio::test]
async fn test_user_rows_carry_post_counts() {
    let state = memory_state();
    let root = admin(&state).await;
    let ada = register(&state, "Ada", "ada@example.com").await;
    seed_post(&state, &ada, "One", true).await;
    seed_post(&state, &ada, "Two", false).await;
    let mut dashboard = AdminDashboard::open(&state, root.clone()).await.unwrap();

    assert_eq!(post_count(&dashboard, ada.user_id), Some(2));
    assert_eq!(post_count(&dashboard, root.user_id), Some(0));

    seed_post(&state, &root, "Three", true).await;
    dashboard.refresh().await.unwrap();
    assert_eq!(post_count(&dashboard, root.user_id), Some(1));
    assert_eq!(dashboard.posts().posts().len(), 3);
}

#[tokio::test]
async fn test_post_counts_follow_the_posts_section_without_refresh() {
    let state = memory_state();
    let root = admin(&state).await;
    let mut dashboard = AdminDashboard::open(&state, root.clone()).await.unwrap();
    assert_eq!(post_count(&dashboard, root.user_id), Some(0));

    let posts = dashboard.posts_mut();
    posts.begin_create().unwrap();
    let draft = posts.draft_mut().unwrap();
    draft.title = "Announcement".to_string();
    draft.content = "Welcome".to_string();
    let post = posts.submit().await.unwrap();

    assert_eq!(post_count(&dashboard, root.user_id), Some(1));
    assert_eq!(dashboard.overview().total_posts, 1);

    let posts = dashboard.posts_mut();
    posts.request_delete(post.id).unwrap();
    posts.confirm_delete().await.unwrap();

    assert_eq!(post_count(&dashboard, root.user_id), Some(0));
}
