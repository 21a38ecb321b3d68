//! External song catalog abstraction.
//!
//! The recommender only ever talks to a catalog through [`ExternalCatalog`];
//! failures are reported as [`CatalogError`] and never abort a
//! recommendation.

mod client;

pub use client::{clean_lrc, HttpCatalogClient, DEFAULT_PLATFORM};

use async_trait::async_trait;
use thiserror::Error;

use crate::recommend::CandidateSong;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timeout")]
    Timeout,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl CatalogError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::Connection(_) => "connection",
            CatalogError::Timeout => "timeout",
            CatalogError::Api { .. } => "api",
            CatalogError::InvalidResponse(_) => "invalid_response",
        }
    }
}

#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait ExternalCatalog: Send + Sync {
    /// Identifier of the platform, e.g. "netease".
    fn platform(&self) -> &str;

    /// Search songs matching a free-text query.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<CandidateSong>, CatalogError>;

    /// Fetch the plain lyric text of a song, `None` when it has none.
    async fn fetch_lyrics(&self, song_id: &str) -> Result<Option<String>, CatalogError>;
}
