//! Error type for the recommender crate.

use data_loader::DataError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommendError {
    /// Lookup failures from the catalog or matrix, passed through untouched
    /// (`NotFound`, `IndexOutOfRange`, `DimensionMismatch`)
    #[error(transparent)]
    Data(#[from] DataError),

    /// `count` must be at least 1
    #[error("Recommendation count must be at least 1, got {0}")]
    InvalidCount(usize),
}

impl RecommendError {
    /// True when the caller asked for something that cannot be served
    /// (unknown title or zero count) rather than the data being broken.
    pub fn is_user_error(&self) -> bool {
        match self {
            RecommendError::Data(e) => e.is_user_error(),
            RecommendError::InvalidCount(_) => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, RecommendError>;
