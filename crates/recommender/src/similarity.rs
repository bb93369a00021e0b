//! Similarity Source - shared entry point over a loaded dataset
//!
//! Wraps an `Arc<Dataset>` so the same catalog and matrix can serve many
//! concurrent callers. Every call is read-only; no locking is involved.

use crate::error::Result;
use crate::recommend::{DEFAULT_RECOMMENDATION_COUNT, Recommendation, recommend};
use data_loader::{Catalog, Dataset};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Recommends movies by looking up the precomputed similarity matrix
#[derive(Debug, Clone)]
pub struct SimilaritySource {
    /// Shared reference to the dataset (read-only, so no Mutex needed)
    dataset: Arc<Dataset>,

    /// Count used by `recommend_default`
    default_count: usize,
}

impl SimilaritySource {
    /// Create a new similarity source
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            default_count: DEFAULT_RECOMMENDATION_COUNT,
        }
    }

    /// Configure the count used when none is given (default: 5)
    pub fn with_default_count(mut self, count: usize) -> Self {
        self.default_count = count;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        self.dataset.catalog()
    }

    /// Top `count` movies most similar to `title`
    #[instrument(skip(self))]
    pub fn recommend(&self, title: &str, count: usize) -> Result<Vec<Recommendation>> {
        let recommendations = recommend(
            self.dataset.catalog(),
            self.dataset.similarity(),
            title,
            count,
        )?;
        debug!("Generated {} recommendations", recommendations.len());
        Ok(recommendations)
    }

    /// Top `default_count` movies most similar to `title`
    pub fn recommend_default(&self, title: &str) -> Result<Vec<Recommendation>> {
        self.recommend(title, self.default_count)
    }
}
