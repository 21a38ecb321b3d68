//! Lyric analysis and recommendation library
//!
//! Scores Chinese song lyrics for sentiment, themes and rhyme, and ranks
//! candidate songs by lyric similarity, from an external catalog when one
//! is reachable and from a local corpus otherwise.

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod lyric;
pub mod metrics;
pub mod recommend;
pub mod rhyme;
pub mod sentiment;
pub mod text;
pub mod theme;

// Re-export commonly used types for convenience
pub use analysis::{AnalysisError, LyricAnalysis, LyricAnalyzer};
pub use catalog::{CatalogError, ExternalCatalog, HttpCatalogClient};
pub use lyric::Lyric;
pub use recommend::{
    CandidateSong, RecommendError, Recommendations, Recommender, SimilarityRanker, SongCorpus,
    UserPreferences,
};
