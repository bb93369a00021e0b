//! # Recommender Crate
//!
//! Content-based "more like this" recommendations over a precomputed
//! similarity matrix.
//!
//! Given a title, the recommender finds its row in the matrix, ranks every
//! other movie by score (highest first, ties by catalog index), and returns
//! the top N. The query movie is never part of its own results.
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Dataset;
//! use recommender::SimilaritySource;
//! use std::sync::Arc;
//!
//! let dataset = Arc::new(Dataset::load_from_files("data".as_ref())?);
//! let source = SimilaritySource::new(dataset);
//!
//! for rec in source.recommend("Avatar", 5)? {
//!     println!("{} ({:.3})", rec.movie.title, rec.score);
//! }
//! ```

// Public modules
pub mod error;
pub mod recommend;
pub mod similarity;

// Re-export commonly used types
pub use error::{RecommendError, Result};
pub use recommend::{DEFAULT_RECOMMENDATION_COUNT, Recommendation, recommend};
pub use similarity::SimilaritySource;
