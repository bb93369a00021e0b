//! # Data Loader Crate
//!
//! Loads the movie catalog and the precomputed similarity matrix that the
//! recommender ranks against.
//!
//! ## Main Components
//!
//! - **types**: `Movie`, `Catalog`, `SimilarityMatrix`, `Dataset`
//! - **parser**: Parse `movies.dat` and `similarity.json`
//! - **dataset**: Load both files from a data directory and check they agree
//! - **error**: Error taxonomy for loading and lookups
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Dataset;
//! use std::path::Path;
//!
//! let dataset = Dataset::load_from_files(Path::new("data"))?;
//!
//! let index = dataset.catalog().find_index_by_title("Avatar")?;
//! let row = dataset.similarity().row(index)?;
//! println!("{} scores for {}", row.len(), dataset.catalog().movie_at(index)?.title);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod dataset;

// Re-export commonly used types for convenience
pub use dataset::{MOVIES_FILE, SIMILARITY_FILE};
pub use error::{DataError, Result};
pub use types::{Catalog, Dataset, Movie, MovieId, SimilarityMatrix};
