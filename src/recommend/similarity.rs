//! Pure similarity signals and their fusion.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::text::{Keyword, STOPWORDS};
use crate::theme::{Theme, ThemeScore};

/// Number of most frequent terms kept in a TF-IDF vocabulary.
pub const MAX_TFIDF_TERMS: usize = 100;
/// Number of query keywords checked against external candidates.
pub const QUERY_KEYWORDS: usize = 5;

/// Fusion and preference weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionWeights {
    pub local_theme: f64,
    pub local_sentiment: f64,
    pub local_content: f64,
    pub external_keyword: f64,
    pub external_theme: f64,
    pub external_content: f64,
    pub theme_boost: f64,
    pub style_boost: f64,
    pub boost_factor: f64,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            local_theme: 0.4,
            local_sentiment: 0.3,
            local_content: 0.3,
            external_keyword: 0.3,
            external_theme: 0.3,
            external_content: 0.4,
            theme_boost: 0.5,
            style_boost: 0.5,
            boost_factor: 0.2,
        }
    }
}

impl FusionWeights {
    pub fn fuse_local(&self, theme: f64, sentiment: f64, content: f64) -> f64 {
        (theme * self.local_theme + sentiment * self.local_sentiment + content * self.local_content)
            .clamp(0.0, 1.0)
    }

    pub fn fuse_external(&self, keyword: f64, theme: f64, content: f64) -> f64 {
        (keyword * self.external_keyword
            + theme * self.external_theme
            + content * self.external_content)
            .clamp(0.0, 1.0)
    }

    /// Scale a fused score by a preference boost, capped at 1.0.
    ///
    /// Boosts are non-negative, so the result is never below `fused`.
    pub fn apply_boost(&self, fused: f64, boost: f64) -> f64 {
        (fused * (1.0 + boost.max(0.0) * self.boost_factor)).min(1.0).max(fused)
    }
}

/// How lyric text is compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSimilarity {
    #[default]
    Jaccard,
    TfCosine,
}

impl ContentSimilarity {
    pub fn compute(self, a: &[String], b: &[String]) -> f64 {
        match self {
            ContentSimilarity::Jaccard => content_jaccard(a, b),
            ContentSimilarity::TfCosine => tfidf_cosine(a, b),
        }
    }
}

impl std::str::FromStr for ContentSimilarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jaccard" => Ok(ContentSimilarity::Jaccard),
            "tf_cosine" | "tfcosine" | "tfidf" => Ok(ContentSimilarity::TfCosine),
            other => Err(format!("unknown content similarity: {}", other)),
        }
    }
}

fn is_content_token(token: &str) -> bool {
    token.chars().count() > 1 && !STOPWORDS.contains(token)
}

fn jaccard<T: Eq + std::hash::Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

/// Jaccard similarity of the sets of theme names.
pub fn theme_similarity(a: &[ThemeScore], b: &[ThemeScore]) -> f64 {
    let a: HashSet<Theme> = a.iter().map(|t| t.theme).collect();
    let b: HashSet<Theme> = b.iter().map(|t| t.theme).collect();
    jaccard(&a, &b)
}

pub fn sentiment_similarity(a: f64, b: f64) -> f64 {
    (1.0 - (a - b).abs()).clamp(0.0, 1.0)
}

/// Jaccard similarity of content tokens.
///
/// Single-character tokens and stopwords are ignored.
pub fn content_jaccard(a: &[String], b: &[String]) -> f64 {
    let a: HashSet<&str> = a.iter().map(String::as_str).filter(|t| is_content_token(t)).collect();
    let b: HashSet<&str> = b.iter().map(String::as_str).filter(|t| is_content_token(t)).collect();
    jaccard(&a, &b)
}

/// Cosine similarity of TF-IDF vectors fitted on the two documents alone.
///
/// Uses raw term counts, smoothed idf `ln((1 + n) / (1 + df)) + 1`, and a
/// vocabulary of the [`MAX_TFIDF_TERMS`] most frequent content tokens.
pub fn tfidf_cosine(a: &[String], b: &[String]) -> f64 {
    let docs: [Vec<&str>; 2] = [
        a.iter().map(String::as_str).filter(|t| is_content_token(t)).collect(),
        b.iter().map(String::as_str).filter(|t| is_content_token(t)).collect(),
    ];

    // corpus frequency, first position for stable ordering
    let mut totals: HashMap<&str, (usize, usize)> = HashMap::new();
    let mut position = 0usize;
    for doc in &docs {
        for term in doc {
            totals.entry(*term).or_insert((0, position)).0 += 1;
            position += 1;
        }
    }
    let mut vocabulary: Vec<(&str, usize, usize)> =
        totals.into_iter().map(|(t, (count, first))| (t, count, first)).collect();
    vocabulary.sort_by(|x, y| y.1.cmp(&x.1).then(x.2.cmp(&y.2)));
    vocabulary.truncate(MAX_TFIDF_TERMS);
    if vocabulary.is_empty() {
        return 0.0;
    }

    let counts: Vec<HashMap<&str, usize>> = docs
        .iter()
        .map(|doc| {
            let mut counts = HashMap::new();
            for term in doc {
                *counts.entry(*term).or_insert(0) += 1;
            }
            counts
        })
        .collect();

    let n = docs.len() as f64;
    let mut vectors = [Vec::new(), Vec::new()];
    for (term, _, _) in &vocabulary {
        let df = counts.iter().filter(|c| c.contains_key(term)).count() as f64;
        let idf = ((1.0 + n) / (1.0 + df)).ln() + 1.0;
        for (i, vector) in vectors.iter_mut().enumerate() {
            let tf = counts[i].get(term).copied().unwrap_or(0) as f64;
            vector.push(tf * idf);
        }
    }

    let dot: f64 = vectors[0].iter().zip(&vectors[1]).map(|(x, y)| x * y).sum();
    let norm_a = vectors[0].iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = vectors[1].iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

/// Fraction of the query's top keywords present among the candidate tokens.
pub fn keyword_similarity(query_keywords: &[Keyword], candidate_tokens: &[String]) -> f64 {
    let keywords: Vec<&Keyword> = query_keywords.iter().take(QUERY_KEYWORDS).collect();
    if keywords.is_empty() {
        return 0.0;
    }
    let tokens: HashSet<&str> = candidate_tokens.iter().map(String::as_str).collect();
    let matched = keywords
        .iter()
        .filter(|k| tokens.contains(k.word.as_str()))
        .count();
    matched as f64 / keywords.len() as f64
}
