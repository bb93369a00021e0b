//! Server crate for the ReelRecs recommendation engine.
//!
//! This crate contains the orchestrator that ranks similar movies and
//! enriches each result with display metadata.

pub mod orchestrator;

pub use orchestrator::{MovieRecommendation, OrchestratorConfig, RecommendationOrchestrator};
