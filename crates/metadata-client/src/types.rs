//! Enrichment values and the TMDB response shapes they are derived from.

use serde::Deserialize;

/// Shown for any metadata field that is unknown
pub const NOT_AVAILABLE: &str = "N/A";

// =============================================================================
// Tagged fetch results
// =============================================================================

/// Outcome of a metadata fetch.
///
/// Both variants carry a usable value: on failure the fallback has already
/// been applied, so callers never deal with transport errors.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    /// Value came from the remote service
    Found(T),
    /// Remote call failed or lacked the field; this is the fallback value
    Fallback(T),
}

impl<T> Fetched<T> {
    pub fn value(&self) -> &T {
        match self {
            Fetched::Found(v) | Fetched::Fallback(v) => v,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Fetched::Found(v) | Fetched::Fallback(v) => v,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Fetched::Fallback(_))
    }
}

// =============================================================================
// Enrichment values
// =============================================================================

/// Genre, release year and rating for one movie
#[derive(Debug, Clone, PartialEq)]
pub struct MovieMetadata {
    /// Genre names joined with ", " (empty if TMDB lists none)
    pub genres: String,
    /// Four-digit release year or "N/A"
    pub year: String,
    /// TMDB vote average, `None` when unknown
    pub rating: Option<f32>,
}

impl MovieMetadata {
    /// All fields unknown
    pub fn not_available() -> Self {
        Self {
            genres: NOT_AVAILABLE.to_string(),
            year: NOT_AVAILABLE.to_string(),
            rating: None,
        }
    }

    pub(crate) fn from_details(details: &MovieDetails) -> Self {
        let genres = details
            .genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let year = details
            .release_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .filter(|year| !year.is_empty())
            .unwrap_or(NOT_AVAILABLE)
            .to_string();

        Self {
            genres,
            year,
            rating: details.vote_average,
        }
    }

    /// Rating for display: the number, or "N/A"
    pub fn rating_label(&self) -> String {
        match self.rating {
            Some(rating) => rating.to_string(),
            None => NOT_AVAILABLE.to_string(),
        }
    }
}

/// Everything shown next to a recommended title
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    pub poster_url: String,
    pub metadata: MovieMetadata,
    pub trailer_url: Option<String>,
}

impl Enrichment {
    /// Placeholder poster, unknown metadata, no trailer
    pub fn fallback(placeholder_poster_url: &str) -> Self {
        Self {
            poster_url: placeholder_poster_url.to_string(),
            metadata: MovieMetadata::not_available(),
            trailer_url: None,
        }
    }
}

// =============================================================================
// TMDB responses
// =============================================================================

/// Subset of `GET /movie/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct MovieDetails {
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<GenreEntry>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f32>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GenreEntry {
    pub name: String,
}

/// Subset of `GET /movie/{id}/videos`
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Video {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl VideoList {
    /// YouTube URL of the first trailer hosted on YouTube
    pub fn youtube_trailer_url(&self) -> Option<String> {
        self.results
            .iter()
            .find(|v| v.site == "YouTube" && v.kind == "Trailer" && !v.key.is_empty())
            .map(|v| format!("https://www.youtube.com/watch?v={}", v.key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_from_details() {
        let details: MovieDetails = serde_json::from_str(
            r#"{
                "poster_path": "/kyeqWdyUXW608qlYkRqosgbbJyK.jpg",
                "genres": [{"id": 28, "name": "Action"}, {"id": 12, "name": "Adventure"}],
                "release_date": "2009-12-15",
                "vote_average": 7.2
            }"#,
        )
        .unwrap();

        let metadata = MovieMetadata::from_details(&details);
        assert_eq!(metadata.genres, "Action, Adventure");
        assert_eq!(metadata.year, "2009");
        assert_eq!(metadata.rating, Some(7.2));
        assert_eq!(metadata.rating_label(), "7.2");
    }

    #[test]
    fn test_metadata_with_missing_fields() {
        let details: MovieDetails =
            serde_json::from_str(r#"{"release_date": "", "genres": []}"#).unwrap();

        let metadata = MovieMetadata::from_details(&details);
        assert_eq!(metadata.genres, "");
        assert_eq!(metadata.year, "N/A");
        assert_eq!(metadata.rating, None);
        assert_eq!(metadata.rating_label(), "N/A");
    }

    #[test]
    fn test_not_available_metadata() {
        let metadata = MovieMetadata::not_available();
        assert_eq!(
            (metadata.genres.as_str(), metadata.year.as_str(), metadata.rating_label().as_str()),
            ("N/A", "N/A", "N/A")
        );
    }

    #[test]
    fn test_first_youtube_trailer_wins() {
        let videos: VideoList = serde_json::from_str(
            r#"{"id": 19995, "results": [
                {"key": "teaser1", "site": "YouTube", "type": "Teaser"},
                {"key": "vimeo1", "site": "Vimeo", "type": "Trailer"},
                {"key": "5PSNL1qE6VY", "site": "YouTube", "type": "Trailer"},
                {"key": "later", "site": "YouTube", "type": "Trailer"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            videos.youtube_trailer_url().as_deref(),
            Some("https://www.youtube.com/watch?v=5PSNL1qE6VY")
        );
    }

    #[test]
    fn test_no_trailer() {
        let videos: VideoList = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert_eq!(videos.youtube_trailer_url(), None);
    }

    #[test]
    fn test_fetched_accessors() {
        let found = Fetched::Found(1);
        let fallback = Fetched::Fallback(2);
        assert!(!found.is_fallback());
        assert!(fallback.is_fallback());
        assert_eq!(*found.value(), 1);
        assert_eq!(fallback.into_inner(), 2);
    }
}
