//! # Quill Studio
//!
//! Bootstrap entry point: configure logging, open the store, seed the
//! administrator and report what the store holds.

use quill_core::ports::BaseRepository;
use quill_studio::config::AppConfig;
use quill_studio::services::AuthService;
use quill_studio::state::AppState;
use quill_studio::telemetry::init_telemetry;
use quill_studio::views::admin::compute_overview;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_telemetry(&config.telemetry);

    tracing::info!(data_dir = ?config.data_dir, "Starting Quill Studio");

    let state = AppState::new(&config).await?;

    if let Some(admin) = &config.bootstrap_admin {
        let user = AuthService::new(&state)
            .ensure_admin(&admin.name, &admin.email, &admin.password)
            .await?;
        tracing::info!(user_id = %user.id, "Administrator account ready");
    }

    let posts = state.posts.list_all().await?;
    let users: Vec<_> = state.users.list_all().await?.iter().map(|u| u.profile()).collect();
    let overview = compute_overview(&posts, &users, chrono::Utc::now());

    tracing::info!(
        total_posts = overview.total_posts,
        published_posts = overview.published_posts,
        draft_posts = overview.draft_posts,
        total_users = overview.total_users,
        admin_users = overview.admin_users,
        posts_this_month = overview.posts_this_month,
        "Store loaded"
    );

    Ok(())
}
