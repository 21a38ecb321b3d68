use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::corpus::SongCorpus;
use super::models::{CandidateSong, RecommendationSource, Recommendations, SongSource};
use super::preferences::{PreferenceStore, UserPreferences};
use super::ranker::{top_k_sorted, LyricProfile, RecommendError, SimilarityRanker};
use crate::catalog::ExternalCatalog;
use crate::metrics;
use crate::text::is_lyric_punctuation;

pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

const KEYWORD_LOOKUPS: usize = 3;
const THEME_LOOKUPS: usize = 2;
const PHRASE_LOOKUPS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LookupKind {
    Keyword,
    Theme,
    Phrase,
}

impl LookupKind {
    fn label(self) -> &'static str {
        match self {
            LookupKind::Keyword => "keyword",
            LookupKind::Theme => "theme",
            LookupKind::Phrase => "phrase",
        }
    }
}

/// Recommends songs for a query lyric, preferring an external catalog and
/// falling back to the local corpus.
pub struct Recommender {
    ranker: SimilarityRanker,
    corpus: Arc<SongCorpus>,
    catalog: Option<Arc<dyn ExternalCatalog>>,
    lookup_timeout: Duration,
}

impl Recommender {
    pub fn new(ranker: SimilarityRanker, corpus: Arc<SongCorpus>) -> Self {
        Self {
            ranker,
            corpus,
            catalog: None,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    pub fn with_catalog(mut self, catalog: Arc<dyn ExternalCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Timeout applied to every single search and lyric fetch.
    pub fn with_lookup_timeout(mut self, lookup_timeout: Duration) -> Self {
        self.lookup_timeout = lookup_timeout;
        self
    }

    pub fn ranker(&self) -> &SimilarityRanker {
        &self.ranker
    }

    pub fn corpus(&self) -> &Arc<SongCorpus> {
        &self.corpus
    }

    pub async fn recommend(
        &self,
        query: &str,
        top_k: usize,
        preferences: Option<&UserPreferences>,
    ) -> Result<Recommendations, RecommendError> {
        let started = Instant::now();
        let profile = self.ranker.profile_query(query)?;

        let result = match &self.catalog {
            Some(catalog) if top_k > 0 => {
                match self.recommend_external(catalog.as_ref(), &profile, top_k).await {
                    Some(external) => external,
                    None => {
                        info!("No usable external candidates, falling back to local corpus");
                        self.recommend_local(&profile, top_k, preferences)
                    }
                }
            }
            _ => self.recommend_local(&profile, top_k, preferences),
        };

        metrics::record_recommendation(result.source.label(), started.elapsed());
        info!(
            source = result.source.label(),
            count = result.items.len(),
            "Recommendations ready"
        );
        Ok(result)
    }

    /// Same as [`Recommender::recommend`] with preferences looked up by user.
    pub async fn recommend_for_user(
        &self,
        query: &str,
        top_k: usize,
        user_id: &str,
        store: &dyn PreferenceStore,
    ) -> Result<Recommendations, RecommendError> {
        let preferences = store.preferences(user_id);
        if preferences.is_none() {
            debug!(user_id, "No stored preferences");
        }
        self.recommend(query, top_k, preferences.as_ref()).await
    }

    fn recommend_local(
        &self,
        profile: &LyricProfile,
        top_k: usize,
        preferences: Option<&UserPreferences>,
    ) -> Recommendations {
        let ranked = self
            .corpus
            .snapshot()
            .iter()
            .map(|song| self.ranker.score_local(profile, song, preferences))
            .collect();
        Recommendations {
            source: RecommendationSource::Local,
            items: top_k_sorted(ranked, top_k),
        }
    }

    async fn recommend_external(
        &self,
        catalog: &dyn ExternalCatalog,
        profile: &LyricProfile,
        top_k: usize,
    ) -> Option<Recommendations> {
        let platform = catalog.platform().to_string();
        let candidates = self.gather_candidates(catalog, profile, top_k).await;
        debug!(
            platform = %platform,
            candidates = candidates.len(),
            "External candidates merged"
        );

        let lyric_limit = top_k.saturating_mul(3);
        let with_lyrics = self
            .attach_lyrics(catalog, candidates.into_iter().take(lyric_limit).collect())
            .await;
        if with_lyrics.is_empty() {
            return None;
        }

        let ranked = with_lyrics
            .into_iter()
            .map(|song| {
                let song = song.with_source(SongSource::External {
                    platform: platform.clone(),
                });
                self.ranker.score_external(profile, song)
            })
            .collect();
        Some(Recommendations {
            source: RecommendationSource::External { platform },
            items: top_k_sorted(ranked, top_k),
        })
    }

    async fn gather_candidates(
        &self,
        catalog: &dyn ExternalCatalog,
        profile: &LyricProfile,
        top_k: usize,
    ) -> Vec<CandidateSong> {
        let wanted = top_k.saturating_mul(2);
        let mut lookups: Vec<(LookupKind, String)> = profile
            .keywords
            .iter()
            .take(KEYWORD_LOOKUPS)
            .map(|k| (LookupKind::Keyword, k.word.clone()))
            .collect();
        lookups.extend(
            profile
                .themes
                .iter()
                .take(THEME_LOOKUPS)
                .map(|t| (LookupKind::Theme, t.theme.name().to_string())),
        );

        let mut merged = MergedCandidates::default();
        let results = join_all(
            lookups
                .iter()
                .map(|(kind, term)| self.lookup(catalog, *kind, term, wanted)),
        )
        .await;
        for songs in results {
            merged.extend(songs);
        }

        if merged.len() < wanted {
            let phrases = frequent_phrases(&profile.tokens, PHRASE_LOOKUPS);
            let results = join_all(
                phrases
                    .iter()
                    .map(|phrase| self.lookup(catalog, LookupKind::Phrase, phrase, top_k)),
            )
            .await;
            for songs in results {
                merged.extend(songs);
            }
        }

        merged.songs
    }

    async fn lookup(
        &self,
        catalog: &dyn ExternalCatalog,
        kind: LookupKind,
        term: &str,
        limit: usize,
    ) -> Vec<CandidateSong> {
        match timeout(self.lookup_timeout, catalog.search(term, limit)).await {
            Ok(Ok(songs)) => {
                metrics::record_catalog_lookup(kind.label(), "ok");
                debug!(kind = kind.label(), term, found = songs.len(), "Catalog lookup done");
                songs
            }
            Ok(Err(e)) => {
                metrics::record_catalog_lookup(kind.label(), e.kind());
                warn!(kind = kind.label(), term, "Catalog lookup failed: {}", e);
                Vec::new()
            }
            Err(_) => {
                metrics::record_catalog_lookup(kind.label(), "timeout");
                warn!(kind = kind.label(), term, "Catalog lookup timed out");
                Vec::new()
            }
        }
    }

    /// Fetch lyrics concurrently, dropping songs whose lyrics stay unknown.
    async fn attach_lyrics(
        &self,
        catalog: &dyn ExternalCatalog,
        songs: Vec<CandidateSong>,
    ) -> Vec<CandidateSong> {
        let fetched = join_all(songs.into_iter().map(|song| async move {
            if song.lyrics.as_deref().is_some_and(|l| !l.trim().is_empty()) {
                return Some(song);
            }
            match timeout(self.lookup_timeout, catalog.fetch_lyrics(&song.id)).await {
                Ok(Ok(Some(lyrics))) if !lyrics.trim().is_empty() => {
                    metrics::record_lyric_fetch("ok");
                    Some(song.with_lyrics(lyrics))
                }
                Ok(Ok(_)) => {
                    metrics::record_lyric_fetch("missing");
                    debug!(song_id = %song.id, "No lyrics available");
                    None
                }
                Ok(Err(e)) => {
                    metrics::record_lyric_fetch(e.kind());
                    debug!(song_id = %song.id, "Lyric fetch failed: {}", e);
                    None
                }
                Err(_) => {
                    metrics::record_lyric_fetch("timeout");
                    debug!(song_id = %song.id, "Lyric fetch timed out");
                    None
                }
            }
        }))
        .await;

        fetched.into_iter().flatten().collect()
    }
}

/// Candidates in first-seen order, unique by title and artist.
#[derive(Default)]
struct MergedCandidates {
    seen: HashSet<(String, String)>,
    songs: Vec<CandidateSong>,
}

impl MergedCandidates {
    fn extend(&mut self, songs: Vec<CandidateSong>) {
        for song in songs {
            if self.seen.insert(song.dedup_key()) {
                self.songs.push(song);
            }
        }
    }

    fn len(&self) -> usize {
        self.songs.len()
    }
}

/// Most frequent phrases of 2 or 3 adjacent tokens.
///
/// Ties keep first-occurrence order, bigrams before trigrams.
fn frequent_phrases(tokens: &[String], n: usize) -> Vec<String> {
    let words: Vec<&str> = tokens
        .iter()
        .map(String::as_str)
        .filter(|t| !t.trim().is_empty() && !t.chars().all(is_lyric_punctuation))
        .collect();

    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut order = 0usize;
    for size in [2, 3] {
        for window in words.windows(size) {
            let entry = counts.entry(window.concat()).or_insert((0, order));
            entry.0 += 1;
            order += 1;
        }
    }

    let mut phrases: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(phrase, (count, first))| (phrase, count, first))
        .collect();
    phrases.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    phrases.into_iter().take(n).map(|(p, _, _)| p).collect()
}
