//! Parsers for the persisted catalog and similarity matrix.
//!
//! - movies.dat: `movieId::title`, one movie per line, in matrix order
//! - similarity.json: JSON array of N rows, each an array of N numbers

use crate::error::{DataError, Result};
use crate::types::{Catalog, MovieId, SimilarityMatrix};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

/// Open a file, reporting a missing file as `FileNotFound`
fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataError::IoError(e),
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read a text file as lines.
///
/// UTF-8 is expected; files that are not valid UTF-8 are decoded as
/// ISO-8859-1, where every byte maps directly to a code point.
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let mut file = open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    };

    Ok(content.lines().map(|s| s.to_string()).collect())
}

/// Parse the movies.dat file into a catalog
///
/// Format: movieId::title
///
/// Only the first `::` separates the fields, so titles may contain `::`.
pub fn parse_movies(path: &Path) -> Result<Catalog> {
    let file = file_label(path);
    let lines = read_lines(path)?;
    let records = parse_movie_lines(&file, lines.iter().map(String::as_str))?;
    Ok(Catalog::from_records(records))
}

/// Parse `movieId::title` lines into `(id, title)` records
pub(crate) fn parse_movie_lines<'a>(
    file: &str,
    lines: impl Iterator<Item = &'a str>,
) -> Result<Vec<(MovieId, String)>> {
    let mut records = Vec::new();

    for (idx, line) in lines.enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let mut parts = line_trimmed.splitn(2, "::");

        let movie_id = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DataError::Schema {
                file: file.to_string(),
                line: line_no,
                field: "id",
            })?;

        let title = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DataError::Schema {
                file: file.to_string(),
                line: line_no,
                field: "title",
            })?;

        let id = movie_id.parse().map_err(|e| DataError::CorruptData {
            file: file.to_string(),
            line: line_no,
            reason: format!("Invalid movieId {:?}: {}", movie_id, e),
        })?;

        records.push((id, title.to_string()));
    }

    Ok(records)
}

/// Parse the similarity.json file
pub fn parse_similarity(path: &Path) -> Result<SimilarityMatrix> {
    let file = file_label(path);
    let reader = BufReader::new(open(path)?);

    let rows: Vec<Vec<f32>> =
        serde_json::from_reader(reader).map_err(|e| DataError::CorruptData {
            file: file.clone(),
            line: e.line(),
            reason: e.to_string(),
        })?;

    SimilarityMatrix::from_rows(rows).map_err(|e| match e {
        DataError::CorruptData { reason, .. } => DataError::CorruptData {
            file,
            line: 0,
            reason,
        },
        other => other,
    })
}
