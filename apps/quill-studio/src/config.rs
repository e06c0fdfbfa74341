//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use crate::telemetry::TelemetryConfig;

/// Administrator account created at startup when no user has its email.
#[derive(Clone)]
pub struct BootstrapAdmin {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory of the JSON file store. `None` keeps everything in memory.
    pub data_dir: Option<PathBuf>,
    pub bootstrap_admin: Option<BootstrapAdmin>,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let data_dir = env::var("QUILL_DATA_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        Self {
            data_dir,
            bootstrap_admin: Self::parse_bootstrap_admin(),
            telemetry: TelemetryConfig::from_env(),
        }
    }

    /// Both QUILL_ADMIN_EMAIL and QUILL_ADMIN_PASSWORD must be set;
    /// QUILL_ADMIN_NAME defaults to "Administrator".
    fn parse_bootstrap_admin() -> Option<BootstrapAdmin> {
        let email = env::var("QUILL_ADMIN_EMAIL").ok()?;
        let password = match env::var("QUILL_ADMIN_PASSWORD") {
            Ok(password) => password,
            Err(_) => {
                tracing::warn!("QUILL_ADMIN_EMAIL is set without QUILL_ADMIN_PASSWORD; skipping admin bootstrap");
                return None;
            }
        };

        Some(BootstrapAdmin {
            name: env::var("QUILL_ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_string()),
            email,
            password,
        })
    }
}
