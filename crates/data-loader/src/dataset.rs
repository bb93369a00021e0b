//! Loading the catalog and similarity matrix from a data directory.
//!
//! Both files are parsed in parallel with `rayon::join`, then paired and
//! checked for matching dimensions before anything is handed out.

use crate::error::Result;
use crate::parser;
use crate::types::Dataset;
use std::path::Path;
use tracing::info;

/// Catalog file name inside the data directory
pub const MOVIES_FILE: &str = "movies.dat";

/// Similarity matrix file name inside the data directory
pub const SIMILARITY_FILE: &str = "similarity.json";

impl Dataset {
    /// Load `movies.dat` and `similarity.json` from a directory.
    ///
    /// Any failure here is fatal: callers must not run with a partial or
    /// inconsistent catalog/matrix pair.
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading catalog and similarity matrix from {:?}", data_dir);

        let movies_path = data_dir.join(MOVIES_FILE);
        let similarity_path = data_dir.join(SIMILARITY_FILE);

        let (catalog, similarity) = rayon::join(
            || parser::parse_movies(&movies_path),
            || parser::parse_similarity(&similarity_path),
        );
        let catalog = catalog?;
        let similarity = similarity?;

        info!(
            "Loaded {} movies and a {}x{} similarity matrix",
            catalog.len(),
            similarity.dimension(),
            similarity.dimension()
        );

        Dataset::new(catalog, similarity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataError;
    use std::fs;
    use tempfile::TempDir;

    fn write_dataset(movies: &str, similarity: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(MOVIES_FILE), movies).unwrap();
        fs::write(dir.path().join(SIMILARITY_FILE), similarity).unwrap();
        dir
    }

    #[test]
    fn test_load_dataset() {
        let dir = write_dataset(
            "1::A\n2::B\n3::C\n",
            "[[1.0, 0.9, 0.2], [0.9, 1.0, 0.4], [0.2, 0.4, 1.0]]",
        );

        let dataset = Dataset::load_from_files(dir.path()).unwrap();
        assert_eq!(dataset.catalog().all_titles(), vec!["A", "B", "C"]);
        assert_eq!(dataset.similarity().dimension(), 3);
    }

    #[test]
    fn test_dimension_mismatch_is_fatal() {
        let dir = write_dataset("1::A\n2::B\n3::C\n", "[[1.0, 0.5], [0.5, 1.0]]");

        let result = Dataset::load_from_files(dir.path());
        assert!(matches!(
            result,
            Err(DataError::DimensionMismatch {
                catalog: 3,
                matrix: 2
            })
        ));
    }

    #[test]
    fn test_load_bundled_data() {
        // Demo dataset shipped in the repository root
        let data_dir = Path::new("../../data");

        if data_dir.exists() {
            let dataset = Dataset::load_from_files(data_dir).unwrap();
            let catalog = dataset.catalog();
            assert_eq!(catalog.len(), 8);
            assert_eq!(catalog.find_index_by_title("Avatar").unwrap(), 0);
            assert_eq!(catalog.movie_at(0).unwrap().id, 19995);
        }
    }

    #[test]
    fn test_missing_matrix_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(MOVIES_FILE), "1::A\n").unwrap();

        let result = Dataset::load_from_files(dir.path());
        assert!(matches!(result, Err(DataError::FileNotFound { .. })));
    }
}
