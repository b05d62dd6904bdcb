//! Engine configuration loaded from the environment.

use anyhow::Context;
use tutorbook_domain::EmailAddress;

use crate::infrastructure::notifications::DEFAULT_RESEND_BASE_URL;

/// Sender address used when `FROM_EMAIL` is unset.
pub const DEFAULT_FROM_EMAIL: &str = "noreply@tutoria.com";

/// Timeout for outbound HTTP calls when `HTTP_TIMEOUT_SECS` is unset.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "tutorbook_engine=debug";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub from_email: EmailAddress,
    /// Without a key, notifications are only logged.
    pub resend_api_key: Option<String>,
    pub resend_base_url: String,
    /// Without a URL, the user directory is empty and notifications are skipped.
    pub auth_service_url: Option<String>,
    pub auth_service_token: Option<String>,
    pub http_timeout_secs: u64,
    pub log_filter: String,
}

impl EngineConfig {
    /// Load `.env.local` / `.env` from the repo root, then read the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        load_dotenv_from_repo_root();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let from_email = get("FROM_EMAIL").unwrap_or_else(|| DEFAULT_FROM_EMAIL.into());
        let from_email = EmailAddress::new(from_email).context("FROM_EMAIL is not a valid email address")?;

        let http_timeout_secs = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("HTTP_TIMEOUT_SECS must be a whole number, got '{raw}'"))?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            from_email,
            resend_api_key: get("RESEND_API_KEY"),
            resend_base_url: get("RESEND_BASE_URL")
                .unwrap_or_else(|| DEFAULT_RESEND_BASE_URL.into()),
            auth_service_url: get("AUTH_SERVICE_URL"),
            auth_service_token: get("AUTH_SERVICE_TOKEN"),
            http_timeout_secs,
            log_filter: get("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.into()),
        })
    }
}

/// Load environment files from the repo root. Local overrides win.
pub fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
