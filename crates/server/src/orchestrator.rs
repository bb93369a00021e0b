//! # Recommendation Orchestrator
//!
//! This module coordinates one recommendation request:
//! 1. Rank similar movies from the similarity matrix (on the blocking pool)
//! 2. Enrich every ranked movie with poster, metadata and trailer,
//!    concurrently and bounded by a semaphore
//! 3. Zip ranking and enrichment back together in rank order
//!
//! Ranking errors (unknown title, broken data) fail the request. Enrichment
//! never does: a failed, slow or panicking enrichment for one movie degrades
//! to fallback values for that movie only.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::sync::Semaphore;
use tracing::{info, warn};

use data_loader::{Catalog, Dataset, MovieId};
use metadata_client::{DEFAULT_PLACEHOLDER_POSTER_URL, Enrichment, MetadataProvider, MovieMetadata};
use recommender::{Recommendation, SimilaritySource};

/// Final recommendation returned to the user
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub score: f32,
    pub poster_url: String,
    pub metadata: MovieMetadata,
    pub trailer_url: Option<String>,
}

impl MovieRecommendation {
    fn new(recommendation: Recommendation, enrichment: Enrichment) -> Self {
        Self {
            movie_id: recommendation.movie.id,
            title: recommendation.movie.title,
            score: recommendation.score,
            poster_url: enrichment.poster_url,
            metadata: enrichment.metadata,
            trailer_url: enrichment.trailer_url,
        }
    }
}

/// Orchestrator tuning knobs
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Enrichment calls allowed in flight at once within one request
    pub max_concurrent_enrichments: usize,
    /// Hard ceiling on a single enrichment, on top of the provider's own timeouts
    pub enrichment_timeout: Duration,
    /// Poster used when an enrichment task is abandoned
    pub placeholder_poster_url: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_enrichments: 5,
            enrichment_timeout: Duration::from_secs(15),
            placeholder_poster_url: DEFAULT_PLACEHOLDER_POSTER_URL.to_string(),
        }
    }
}

/// Main orchestrator that coordinates ranking and enrichment
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    source: SimilaritySource,
    provider: Arc<dyn MetadataProvider>,
    config: OrchestratorConfig,
}

impl RecommendationOrchestrator {
    /// Create an orchestrator with default settings
    ///
    /// # Arguments
    /// * `dataset` - Shared, already validated catalog and similarity matrix
    /// * `provider` - Where display metadata comes from (TMDB or offline)
    pub fn new(dataset: Arc<Dataset>, provider: Arc<dyn MetadataProvider>) -> Self {
        Self::with_config(dataset, provider, OrchestratorConfig::default())
    }

    pub fn with_config(
        dataset: Arc<Dataset>,
        provider: Arc<dyn MetadataProvider>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            source: SimilaritySource::new(dataset),
            provider,
            config,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.source.catalog()
    }

    /// Main entry point: movies similar to `title`, enriched for display
    ///
    /// # Returns
    /// Up to `limit` recommendations, highest similarity first
    pub async fn get_recommendations(
        &self,
        title: &str,
        limit: usize,
    ) -> Result<Vec<MovieRecommendation>> {
        let start_time = Instant::now();

        let ranked = self.rank(title, limit).await?;
        info!("Ranked {} movies similar to {:?}", ranked.len(), title);

        let enrichments = self.enrich_all(&ranked).await;
        info!(
            "Enriched {} recommendations via {}",
            enrichments.len(),
            self.provider.name()
        );

        let recommendations: Vec<MovieRecommendation> = ranked
            .into_iter()
            .zip(enrichments)
            .map(|(recommendation, enrichment)| MovieRecommendation::new(recommendation, enrichment))
            .collect();

        info!(
            "Total time to get recommendations for {:?}: {:.2?}",
            title,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Rank on the blocking pool; the sort is CPU-bound
    async fn rank(&self, title: &str, limit: usize) -> Result<Vec<Recommendation>> {
        let source = self.source.clone();
        let owned_title = title.to_string();

        tokio::task::spawn_blocking(move || source.recommend(&owned_title, limit))
            .await
            .context("Ranking task panicked")?
            .with_context(|| format!("Failed to recommend movies similar to {:?}", title))
    }

    /// Enrich every ranked movie concurrently, keeping rank order
    ///
    /// Permits are per request: concurrent requests do not queue behind
    /// each other's enrichments.
    async fn enrich_all(&self, ranked: &[Recommendation]) -> Vec<Enrichment> {
        let enrichment_permits = Arc::new(Semaphore::new(self.config.max_concurrent_enrichments.max(1)));
        let handles: Vec<_> = ranked
            .iter()
            .map(|recommendation| {
                let provider = self.provider.clone();
                let permits = enrichment_permits.clone();
                let deadline = self.config.enrichment_timeout;
                let movie_id = recommendation.movie.id;

                tokio::spawn(async move {
                    let _permit = permits.acquire_owned().await.ok();
                    tokio::time::timeout(deadline, provider.enrich(movie_id)).await
                })
            })
            .collect();

        let mut enrichments = Vec::with_capacity(handles.len());
        for (handle, recommendation) in handles.into_iter().zip(ranked) {
            let enrichment = match handle.await {
                Ok(Ok(enrichment)) => enrichment,
                Ok(Err(_)) => {
                    warn!(
                        movie_id = recommendation.movie.id,
                        "Enrichment exceeded {:?}, using fallback", self.config.enrichment_timeout
                    );
                    Enrichment::fallback(&self.config.placeholder_poster_url)
                }
                Err(e) => {
                    warn!(
                        movie_id = recommendation.movie.id,
                        error = %e,
                        "Enrichment task failed, using fallback"
                    );
                    Enrichment::fallback(&self.config.placeholder_poster_url)
                }
            };
            enrichments.push(enrichment);
        }
        enrichments
    }
}
