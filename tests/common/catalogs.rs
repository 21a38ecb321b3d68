#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use lyric_recommender::catalog::{CatalogError, ExternalCatalog};
use lyric_recommender::recommend::CandidateSong;

/// Catalog answering from fixed tables and recording every request.
///
/// Unknown queries return no songs, unknown ids have no lyrics.
#[derive(Default)]
pub struct ScriptedCatalog {
    platform: String,
    results: HashMap<String, Vec<CandidateSong>>,
    delays: HashMap<String, Duration>,
    lyrics: HashMap<String, String>,
    failing_lyrics: HashSet<String>,
    searches: Mutex<Vec<(String, usize)>>,
    lyric_requests: Mutex<Vec<String>>,
}

impl ScriptedCatalog {
    pub fn new(platform: &str) -> Self {
        Self {
            platform: platform.to_string(),
            ..Default::default()
        }
    }

    pub fn with_results(mut self, query: &str, songs: Vec<CandidateSong>) -> Self {
        self.results.insert(query.to_string(), songs);
        self
    }

    /// Delay the answer to `query`.
    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn with_lyrics(mut self, song_id: &str, lyrics: &str) -> Self {
        self.lyrics.insert(song_id.to_string(), lyrics.to_string());
        self
    }

    pub fn with_failing_lyrics(mut self, song_id: &str) -> Self {
        self.failing_lyrics.insert(song_id.to_string());
        self
    }

    /// Searches as (query, limit), in call order.
    pub fn searches(&self) -> Vec<(String, usize)> {
        self.searches.lock().unwrap().clone()
    }

    pub fn lyric_requests(&self) -> Vec<String> {
        self.lyric_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExternalCatalog for ScriptedCatalog {
    fn platform(&self) -> &str {
        &self.platform
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<CandidateSong>, CatalogError> {
        self.searches
            .lock()
            .unwrap()
            .push((query.to_string(), limit));
        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        let mut songs = self.results.get(query).cloned().unwrap_or_default();
        songs.truncate(limit);
        Ok(songs)
    }

    async fn fetch_lyrics(&self, song_id: &str) -> Result<Option<String>, CatalogError> {
        self.lyric_requests
            .lock()
            .unwrap()
            .push(song_id.to_string());
        if self.failing_lyrics.contains(song_id) {
            return Err(CatalogError::Connection("scripted failure".to_string()));
        }
        Ok(self.lyrics.get(song_id).cloned())
    }
}

/// Catalog whose requests never finish in time.
pub struct TimeoutCatalog;

#[async_trait]
impl ExternalCatalog for TimeoutCatalog {
    fn platform(&self) -> &str {
        "slow"
    }

    async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<CandidateSong>, CatalogError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Vec::new())
    }

    async fn fetch_lyrics(&self, _song_id: &str) -> Result<Option<String>, CatalogError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(None)
    }
}

/// Catalog rejecting every request.
pub struct FailingCatalog;

#[async_trait]
impl ExternalCatalog for FailingCatalog {
    fn platform(&self) -> &str {
        "broken"
    }

    async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<CandidateSong>, CatalogError> {
        Err(CatalogError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        })
    }

    async fn fetch_lyrics(&self, _song_id: &str) -> Result<Option<String>, CatalogError> {
        Err(CatalogError::Connection("refused".to_string()))
    }
}
