//! Error types for the data-loader crate.
//!
//! Two families live here:
//! - load-time failures (`FileNotFound`, `IoError`, `CorruptData`, `Schema`,
//!   `DimensionMismatch`) which are fatal at startup
//! - lookup failures (`NotFound`, `IndexOutOfRange`) raised by the catalog
//!   and the similarity matrix while serving requests

use thiserror::Error;

/// Errors that can occur while loading or querying the catalog and matrix
#[derive(Error, Debug)]
pub enum DataError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Source is unreadable or malformed
    ///
    /// `line` is 0 when the problem is not tied to a single line
    /// (e.g. a JSON document that fails to parse as a whole).
    #[error("Corrupt data at line {line} in {file}: {reason}")]
    CorruptData {
        file: String,
        line: usize,
        reason: String,
    },

    /// A required field is missing or empty
    #[error("Schema error at line {line} in {file}: missing required field `{field}`")]
    Schema {
        file: String,
        line: usize,
        field: &'static str,
    },

    /// Catalog and similarity matrix disagree on the number of movies
    #[error("Catalog has {catalog} movies but similarity matrix is {matrix}x{matrix}")]
    DimensionMismatch { catalog: usize, matrix: usize },

    /// No movie in the catalog has this exact title
    #[error("Movie not found: {title}")]
    NotFound { title: String },

    /// Index outside `[0, len)`
    #[error("Index {index} out of range for {len} movies")]
    IndexOutOfRange { index: usize, len: usize },
}

impl DataError {
    /// True for errors caused by caller input rather than broken data.
    ///
    /// Only `NotFound` qualifies: the process can report it and carry on.
    pub fn is_user_error(&self) -> bool {
        matches!(self, DataError::NotFound { .. })
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataError>;
