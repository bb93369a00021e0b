//! Content-similarity ranking.
//!
//! ## Algorithm
//! 1. Resolve the title to its catalog index
//! 2. Read that row of the similarity matrix
//! 3. Pair every other index with its score (the query itself is skipped,
//!    whatever its self-similarity)
//! 4. Sort by score DESC, ties by catalog index ASC
//! 5. Keep the first `count`
//! 6. Attach the catalog entry to each kept score

use crate::error::{RecommendError, Result};
use data_loader::{Catalog, DataError, Movie, SimilarityMatrix};
use std::cmp::Ordering;
use tracing::{debug, error};

/// Number of recommendations shown when the caller does not ask for a count
pub const DEFAULT_RECOMMENDATION_COUNT: usize = 5;

/// A ranked catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub movie: Movie,
    pub score: f32,
}

/// Rank the movies most similar to `title`.
///
/// Returns `min(count, N - 1)` recommendations, never including the query
/// movie. Output is deterministic for identical inputs.
///
/// # Errors
/// - `InvalidCount` if `count == 0`
/// - `NotFound` if no movie has exactly this title
/// - `DimensionMismatch` / `IndexOutOfRange` if catalog and matrix disagree
pub fn recommend(
    catalog: &Catalog,
    similarity: &SimilarityMatrix,
    title: &str,
    count: usize,
) -> Result<Vec<Recommendation>> {
    if count == 0 {
        return Err(RecommendError::InvalidCount(count));
    }

    if catalog.len() != similarity.dimension() {
        let err = DataError::DimensionMismatch {
            catalog: catalog.len(),
            matrix: similarity.dimension(),
        };
        error!("Refusing to rank: {}", err);
        return Err(err.into());
    }

    let query_index = catalog.find_index_by_title(title)?;
    let row = similarity.row(query_index)?;

    let ranked = rank_row(row, query_index, count);
    debug!(
        "Ranked {} candidates for {:?}, keeping {}",
        row.len().saturating_sub(1),
        title,
        ranked.len()
    );

    ranked
        .into_iter()
        .map(|(index, score)| -> Result<Recommendation> {
            let movie = catalog.movie_at(index).map_err(|e| {
                error!("Similarity row points outside the catalog: {}", e);
                e
            })?;
            Ok(Recommendation {
                movie: movie.clone(),
                score,
            })
        })
        .collect()
}

/// Order a similarity row and keep the top `count` `(index, score)` pairs,
/// skipping `exclude`.
fn rank_row(row: &[f32], exclude: usize, count: usize) -> Vec<(usize, f32)> {
    let mut scored: Vec<(usize, f32)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|&(index, _)| index != exclude)
        .collect();

    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    scored.truncate(count);
    scored
}
