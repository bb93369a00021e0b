//! The enrichment seam used by the orchestrator.

use crate::config::DEFAULT_PLACEHOLDER_POSTER_URL;
use crate::types::Enrichment;
use data_loader::MovieId;

/// Source of per-movie display metadata.
///
/// `enrich` is infallible by contract: implementations absorb their own
/// failures and return fallback values instead.
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Returns the name of this provider (for logging/debugging)
    fn name(&self) -> &str;

    /// Poster, metadata and trailer for one movie
    async fn enrich(&self, movie_id: MovieId) -> Enrichment;
}

/// Provider that never touches the network and always returns fallbacks.
///
/// Used when no API key is configured or the user asks for offline mode.
#[derive(Debug, Clone)]
pub struct OfflineProvider {
    placeholder_poster_url: String,
}

impl OfflineProvider {
    pub fn new(placeholder_poster_url: impl Into<String>) -> Self {
        Self {
            placeholder_poster_url: placeholder_poster_url.into(),
        }
    }
}

impl Default for OfflineProvider {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER_POSTER_URL)
    }
}

#[async_trait::async_trait]
impl MetadataProvider for OfflineProvider {
    fn name(&self) -> &str {
        "offline"
    }

    async fn enrich(&self, _movie_id: MovieId) -> Enrichment {
        Enrichment::fallback(&self.placeholder_poster_url)
    }
}
