//! Core domain types: the movie catalog and the similarity matrix.
//!
//! Both are built once at startup and never mutated afterwards, so they can
//! be shared between threads behind an `Arc` without locking.

use crate::error::{DataError, Result};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// External movie-database identifier (a TMDB movie key)
pub type MovieId = u32;

// =============================================================================
// Movie
// =============================================================================

/// A single catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Position in the catalog, which is also the row/column in the similarity matrix
    pub index: usize,
}

// =============================================================================
// Catalog
// =============================================================================

/// Ordered, index-addressable table of movies.
///
/// Index order is the order the movies were loaded in and must match the
/// similarity matrix's dimension order.
#[derive(Debug, Clone)]
pub struct Catalog {
    movies: Vec<Movie>,
    /// Title -> index of the first movie carrying that title
    title_index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from `(id, title)` pairs, assigning indices in order.
    ///
    /// Duplicate titles are kept as separate movies; lookups by title resolve
    /// to the one with the lowest index.
    pub fn from_records<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = (MovieId, S)>,
        S: Into<String>,
    {
        let movies: Vec<Movie> = records
            .into_iter()
            .enumerate()
            .map(|(index, (id, title))| Movie {
                id,
                title: title.into(),
                index,
            })
            .collect();

        let mut title_index = HashMap::with_capacity(movies.len());
        for movie in &movies {
            title_index.entry(movie.title.clone()).or_insert(movie.index);
        }

        Self {
            movies,
            title_index,
        }
    }

    /// Number of movies (N)
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Resolve an exact, case-sensitive title to its catalog index
    pub fn find_index_by_title(&self, title: &str) -> Result<usize> {
        self.title_index
            .get(title)
            .copied()
            .ok_or_else(|| DataError::NotFound {
                title: title.to_string(),
            })
    }

    /// Get the movie at `index`
    pub fn movie_at(&self, index: usize) -> Result<&Movie> {
        self.movies.get(index).ok_or(DataError::IndexOutOfRange {
            index,
            len: self.movies.len(),
        })
    }

    /// All titles in catalog index order
    pub fn all_titles(&self) -> Vec<&str> {
        self.movies.iter().map(|m| m.title.as_str()).collect()
    }

    /// Iterate movies in catalog index order
    pub fn iter(&self) -> impl Iterator<Item = &Movie> {
        self.movies.iter()
    }

    /// Case-insensitive substring search over titles.
    ///
    /// Exact (case-insensitive) matches come first, then substring matches;
    /// within each group catalog order is kept.
    pub fn search(&self, query: &str) -> Vec<&Movie> {
        let query = query.to_lowercase();
        let mut matches: Vec<(u8, &Movie)> = self
            .movies
            .iter()
            .filter_map(|movie| {
                let title = movie.title.to_lowercase();
                if title == query {
                    Some((0, movie))
                } else if title.contains(&query) {
                    Some((1, movie))
                } else {
                    None
                }
            })
            .collect();

        // Stable sort keeps catalog order inside each relevance bucket
        matches.sort_by_key(|(relevance, _)| *relevance);
        matches.into_iter().map(|(_, movie)| movie).collect()
    }
}

// =============================================================================
// SimilarityMatrix
// =============================================================================

/// Dense N x N matrix of similarity scores, stored row-major.
///
/// Entry (i, j) is the similarity of movie i to movie j. Symmetry is expected
/// but not enforced.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    dimension: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Build a matrix from its rows.
    ///
    /// Fails with `CorruptData` if the rows do not form a square matrix or
    /// contain a non-finite score.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let dimension = rows.len();
        let mut scores = Vec::with_capacity(dimension * dimension);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != dimension {
                return Err(DataError::CorruptData {
                    file: "similarity matrix".to_string(),
                    line: 0,
                    reason: format!(
                        "row {} has {} scores, expected {}",
                        i,
                        row.len(),
                        dimension
                    ),
                });
            }
            if let Some(j) = row.iter().position(|s| !s.is_finite()) {
                return Err(DataError::CorruptData {
                    file: "similarity matrix".to_string(),
                    line: 0,
                    reason: format!("non-finite score at ({}, {})", i, j),
                });
            }
            scores.extend(row);
        }

        Ok(Self { dimension, scores })
    }

    /// Number of rows (and columns)
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Scores of movie `index` against every movie, in catalog order
    pub fn row(&self, index: usize) -> Result<&[f32]> {
        if index >= self.dimension {
            return Err(DataError::IndexOutOfRange {
                index,
                len: self.dimension,
            });
        }
        let start = index * self.dimension;
        Ok(&self.scores[start..start + self.dimension])
    }

    /// Single score lookup
    pub fn score(&self, i: usize, j: usize) -> Result<f32> {
        let row = self.row(i)?;
        row.get(j).copied().ok_or(DataError::IndexOutOfRange {
            index: j,
            len: self.dimension,
        })
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// Catalog and similarity matrix loaded together.
///
/// Construct through [`Dataset::new`] (or `load_from_files`) so the
/// dimension invariant is always checked.
#[derive(Debug, Clone)]
pub struct Dataset {
    catalog: Catalog,
    similarity: SimilarityMatrix,
}

impl Dataset {
    /// Pair a catalog with its matrix, checking `catalog.len() == matrix.dimension()`
    pub fn new(catalog: Catalog, similarity: SimilarityMatrix) -> Result<Self> {
        if catalog.len() != similarity.dimension() {
            return Err(DataError::DimensionMismatch {
                catalog: catalog.len(),
                matrix: similarity.dimension(),
            });
        }
        Ok(Self {
            catalog,
            similarity,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }
}
