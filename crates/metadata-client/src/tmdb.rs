//! TMDB-backed metadata client.
//!
//! Every public fetch applies the configured timeout and turns any failure
//! (transport, timeout, non-2xx status, malformed body, missing field) into
//! its documented fallback value.

use crate::config::ClientConfig;
use crate::error::{MetadataClientError, Result};
use crate::provider::MetadataProvider;
use crate::types::{Enrichment, Fetched, MovieDetails, MovieMetadata, VideoList};
use data_loader::MovieId;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    config: ClientConfig,
}

impl TmdbClient {
    /// Build a client from configuration.
    ///
    /// Fails if no API key is configured or the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(MetadataClientError::MissingApiKey)?;

        let http_client = HttpClient::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            http_client,
            api_key,
            config,
        })
    }

    /// Poster image URL, or the placeholder
    #[instrument(skip(self))]
    pub async fn fetch_poster(&self, movie_id: MovieId) -> Fetched<String> {
        match self.get_details(movie_id).await {
            Ok(details) => self.poster_from(&details),
            Err(e) => {
                warn!(movie_id, error = %e, "Error fetching poster");
                Fetched::Fallback(self.config.placeholder_poster_url.clone())
            }
        }
    }

    /// Genres, year and rating, or all "N/A"
    #[instrument(skip(self))]
    pub async fn fetch_metadata(&self, movie_id: MovieId) -> Fetched<MovieMetadata> {
        match self.get_details(movie_id).await {
            Ok(details) => Fetched::Found(MovieMetadata::from_details(&details)),
            Err(e) => {
                warn!(movie_id, error = %e, "Error fetching metadata");
                Fetched::Fallback(MovieMetadata::not_available())
            }
        }
    }

    /// YouTube trailer URL; `None` if the movie has none or the call failed
    #[instrument(skip(self))]
    pub async fn fetch_trailer(&self, movie_id: MovieId) -> Fetched<Option<String>> {
        match self.get_videos(movie_id).await {
            Ok(videos) => Fetched::Found(videos.youtube_trailer_url()),
            Err(e) => {
                warn!(movie_id, error = %e, "Error fetching trailer");
                Fetched::Fallback(None)
            }
        }
    }

    fn poster_from(&self, details: &MovieDetails) -> Fetched<String> {
        match details.poster_path.as_deref().filter(|p| !p.is_empty()) {
            Some(path) => Fetched::Found(format!(
                "{}/{}",
                self.config.image_base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )),
            None => Fetched::Fallback(self.config.placeholder_poster_url.clone()),
        }
    }

    async fn get_details(&self, movie_id: MovieId) -> Result<MovieDetails> {
        self.get_json(&format!("movie/{}", movie_id)).await
    }

    async fn get_videos(&self, movie_id: MovieId) -> Result<VideoList> {
        self.get_json(&format!("movie/{}/videos", movie_id)).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}/{}", self.config.api_url.trim_end_matches('/'), path);
        debug!(%url, "Requesting TMDB");

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.config.language.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MetadataClientError::Status {
                status: response.status().as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| MetadataClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    /// One details request feeds both poster and metadata; the videos
    /// request runs alongside it.
    async fn enrich(&self, movie_id: MovieId) -> Enrichment {
        let (details, videos) = tokio::join!(self.get_details(movie_id), self.get_videos(movie_id));

        let (poster_url, metadata) = match details {
            Ok(details) => (
                self.poster_from(&details).into_inner(),
                MovieMetadata::from_details(&details),
            ),
            Err(e) => {
                warn!(movie_id, error = %e, "Error fetching movie details");
                (
                    self.config.placeholder_poster_url.clone(),
                    MovieMetadata::not_available(),
                )
            }
        };

        let trailer_url = match videos {
            Ok(videos) => videos.youtube_trailer_url(),
            Err(e) => {
                warn!(movie_id, error = %e, "Error fetching trailer");
                None
            }
        };

        Enrichment {
            poster_url,
            metadata,
            trailer_url,
        }
    }
}
