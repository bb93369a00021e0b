use crate::error::{MetadataClientError, Result};
use serde::Deserialize;
use std::time::Duration;

/// Fixed image returned whenever a poster cannot be resolved
pub const DEFAULT_PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/150";

/// Metadata client configuration, read from `TMDB_*` environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// TMDB v3 API key (`TMDB_API_KEY`)
    #[serde(default)]
    pub api_key: Option<String>,

    /// TMDB API base URL (`TMDB_API_URL`)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Base URL poster paths are appended to (`TMDB_IMAGE_BASE_URL`)
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Poster URL used when the real one is unavailable (`TMDB_PLACEHOLDER_POSTER_URL`)
    #[serde(default = "default_placeholder_poster_url")]
    pub placeholder_poster_url: String,

    /// Per-request timeout in seconds (`TMDB_TIMEOUT_SECS`)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Response language (`TMDB_LANGUAGE`)
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500/".to_string()
}

fn default_placeholder_poster_url() -> String {
    DEFAULT_PLACEHOLDER_POSTER_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_language() -> String {
    "en-US".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
            image_base_url: default_image_base_url(),
            placeholder_poster_url: default_placeholder_poster_url(),
            timeout_secs: default_timeout_secs(),
            language: default_language(),
        }
    }
}

impl ClientConfig {
    /// Defaults with the given API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables (and `.env`, if present)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        envy::prefixed("TMDB_")
            .from_env::<ClientConfig>()
            .map_err(|e| MetadataClientError::Config(e.to_string()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
