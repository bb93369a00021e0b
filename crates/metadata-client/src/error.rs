//! Errors raised inside the metadata client.
//!
//! None of these leave the crate through the `fetch_*`/`enrich` calls: they
//! are logged and replaced by fallback values. They surface only from
//! construction (`TmdbClient::new`, `ClientConfig::from_env`).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataClientError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("TMDB_API_KEY is not set")]
    MissingApiKey,

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP client error: {0}")]
    Http(reqwest::Error),

    #[error("TMDB returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Invalid response from TMDB: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for MetadataClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            MetadataClientError::Timeout(e.to_string())
        } else {
            MetadataClientError::Http(e)
        }
    }
}

pub type Result<T> = std::result::Result<T, MetadataClientError>;
