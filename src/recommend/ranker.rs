use std::cmp::Ordering;
use std::sync::Arc;
use thiserror::Error;

use super::explanation::explain;
use super::models::{CandidateSong, RankedRecommendation, SimilarityBreakdown};
use super::preferences::UserPreferences;
use super::similarity::{
    keyword_similarity, sentiment_similarity, theme_similarity, ContentSimilarity, FusionWeights,
    QUERY_KEYWORDS,
};
use crate::lyric::Lyric;
use crate::sentiment::{Emotion, SentimentScorer};
use crate::text::{Keyword, Tokenizer};
use crate::theme::{ThemeClassifier, ThemeScore};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecommendError {
    #[error("query lyric is empty")]
    EmptyQuery,
}

/// Everything the ranker needs to know about one lyric.
#[derive(Debug, Clone, PartialEq)]
pub struct LyricProfile {
    pub tokens: Vec<String>,
    pub themes: Vec<ThemeScore>,
    pub mean_polarity: f64,
    pub tone: Emotion,
    /// Top keywords; only filled in for queries.
    pub keywords: Vec<Keyword>,
}

/// Scores candidate songs against a query lyric.
#[derive(Clone)]
pub struct SimilarityRanker {
    tokenizer: Arc<dyn Tokenizer>,
    sentiment: SentimentScorer,
    themes: ThemeClassifier,
    content: ContentSimilarity,
    weights: FusionWeights,
}

impl SimilarityRanker {
    pub fn new(
        tokenizer: Arc<dyn Tokenizer>,
        sentiment: SentimentScorer,
        themes: ThemeClassifier,
    ) -> Self {
        Self {
            tokenizer,
            sentiment,
            themes,
            content: ContentSimilarity::default(),
            weights: FusionWeights::default(),
        }
    }

    pub fn with_content_similarity(mut self, content: ContentSimilarity) -> Self {
        self.content = content;
        self
    }

    pub fn with_weights(mut self, weights: FusionWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn weights(&self) -> &FusionWeights {
        &self.weights
    }

    fn profile(&self, lyric: &Lyric) -> LyricProfile {
        let sentiment = self.sentiment.score_lyric(lyric);
        LyricProfile {
            tokens: self.tokenizer.segment(&lyric.text()),
            themes: self.themes.score_themes(lyric),
            mean_polarity: sentiment.mean_polarity,
            tone: sentiment.dominant_emotion,
            keywords: Vec::new(),
        }
    }

    /// Profile a query, rejecting lyrics without any line.
    pub fn profile_query(&self, query: &str) -> Result<LyricProfile, RecommendError> {
        let lyric = Lyric::parse(query);
        if lyric.is_empty() {
            return Err(RecommendError::EmptyQuery);
        }
        let mut profile = self.profile(&lyric);
        profile.keywords = self.themes.top_keywords(&lyric, QUERY_KEYWORDS);
        Ok(profile)
    }

    /// Local fusion of theme, sentiment and content similarity, with an
    /// optional preference boost.
    pub fn score_local(
        &self,
        query: &LyricProfile,
        song: &CandidateSong,
        preferences: Option<&UserPreferences>,
    ) -> RankedRecommendation {
        let candidate = self.profile(&Lyric::parse(song.lyrics_or_empty()));
        let breakdown = SimilarityBreakdown {
            theme: theme_similarity(&query.themes, &candidate.themes),
            sentiment: sentiment_similarity(query.mean_polarity, candidate.mean_polarity),
            content: self.content.compute(&query.tokens, &candidate.tokens),
            keyword: None,
        };
        let mut similarity =
            self.weights
                .fuse_local(breakdown.theme, breakdown.sentiment, breakdown.content);
        if let Some(preferences) = preferences {
            let boost = preferences.boost_for(song, &self.weights);
            similarity = self.weights.apply_boost(similarity, boost);
        }

        RankedRecommendation {
            song: song.clone(),
            similarity,
            breakdown,
            explanation: explain(query, &candidate),
        }
    }

    /// External fusion of keyword, theme and content similarity.
    pub fn score_external(&self, query: &LyricProfile, song: CandidateSong) -> RankedRecommendation {
        let candidate = self.profile(&Lyric::parse(song.lyrics_or_empty()));
        let theme = theme_similarity(&query.themes, &candidate.themes);
        let keyword = keyword_similarity(&query.keywords, &candidate.tokens);
        let content = self.content.compute(&query.tokens, &candidate.tokens);
        let breakdown = SimilarityBreakdown {
            theme,
            sentiment: sentiment_similarity(query.mean_polarity, candidate.mean_polarity),
            content,
            keyword: Some(keyword),
        };

        RankedRecommendation {
            similarity: self.weights.fuse_external(keyword, theme, content),
            breakdown,
            explanation: explain(query, &candidate),
            song,
        }
    }

    /// Rank candidates against a query lyric with the local fusion.
    ///
    /// Candidates without lyrics score as empty text. Equal scores keep the
    /// candidate order.
    pub fn recommend(
        &self,
        query: &str,
        candidates: &[Arc<CandidateSong>],
        top_k: usize,
        preferences: Option<&UserPreferences>,
    ) -> Result<Vec<RankedRecommendation>, RecommendError> {
        let profile = self.profile_query(query)?;
        let ranked = candidates
            .iter()
            .map(|song| self.score_local(&profile, song, preferences))
            .collect();
        Ok(top_k_sorted(ranked, top_k))
    }
}

/// Stable descending sort by similarity, truncated to `top_k`.
pub(crate) fn top_k_sorted(
    mut ranked: Vec<RankedRecommendation>,
    top_k: usize,
) -> Vec<RankedRecommendation> {
    ranked.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(top_k);
    ranked
}
