//! Metadata enrichment client for recommended movies.
//!
//! This crate fetches display metadata for a movie from TMDB:
//! - poster image URL
//! - genres, release year and vote average
//! - YouTube trailer link
//!
//! Each call is bounded by a timeout and never fails: on any error it
//! returns a documented fallback (placeholder poster, "N/A" metadata, no
//! trailer) tagged as `Fetched::Fallback`.

pub mod config;
pub mod error;
pub mod provider;
pub mod tmdb;
pub mod types;

pub use config::{ClientConfig, DEFAULT_PLACEHOLDER_POSTER_URL};
pub use error::{MetadataClientError, Result};
pub use provider::{MetadataProvider, OfflineProvider};
pub use tmdb::TmdbClient;
pub use types::{Enrichment, Fetched, MovieMetadata, NOT_AVAILABLE};
