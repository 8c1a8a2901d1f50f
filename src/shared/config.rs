//! Application configuration. API endpoint, token file, UI language.

use crate::domain::Locale;
use crate::usecases::DEFAULT_ACTION_BUFFER;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TOKEN_PATH: &str = "./data/token.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// GitHub REST API base URL. Read from REPO_VIEWER_API_URL.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Where the signed-in token is persisted. Read from REPO_VIEWER_TOKEN_PATH.
    #[serde(default)]
    pub token_path: Option<String>,

    /// Message catalog language ("en" or "ru"). Read from REPO_VIEWER_LOCALE.
    #[serde(default)]
    pub locale: Option<String>,

    /// Capacity of the sign-in action queue. Read from REPO_VIEWER_ACTION_BUFFER.
    #[serde(default)]
    pub action_buffer: Option<usize>,

    /// Per-request HTTP timeout in seconds. Read from REPO_VIEWER_REQUEST_TIMEOUT_SECS.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("REPO_VIEWER").try_parsing(true));
        if let Ok(path) = std::env::var("REPO_VIEWER_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    pub fn api_url_or_default(&self) -> String {
        self.api_url
            .as_deref()
            .map(|u| u.trim_end_matches('/'))
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .to_string()
    }

    pub fn token_path_or_default(&self) -> PathBuf {
        PathBuf::from(
            self.token_path
                .as_deref()
                .filter(|p| !p.is_empty())
                .unwrap_or(DEFAULT_TOKEN_PATH),
        )
    }

    /// Returns the configured locale. Unknown values fall back to English.
    pub fn locale_or_default(&self) -> Locale {
        self.locale
            .as_deref()
            .and_then(|l| l.parse().ok())
            .unwrap_or_default()
    }

    /// Returns the action queue capacity. Zero is treated as unset.
    pub fn action_buffer_or_default(&self) -> usize {
        self.action_buffer
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_ACTION_BUFFER)
    }

    pub fn request_timeout_or_default(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|&s| s > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }
}
