//! Tokenizer trait and the bundled implementations.

use jieba_rs::{Jieba, KeywordExtract, TfIdf};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{is_lyric_punctuation, STOPWORDS};

/// A token ranked by salience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub word: String,
    pub weight: f64,
}

/// Word segmentation backend.
pub trait Tokenizer: Send + Sync {
    /// Split text into an ordered sequence of tokens.
    ///
    /// Whitespace-only tokens are never returned.
    fn segment(&self, text: &str) -> Vec<String>;

    /// Rank the most salient tokens of `text`, most salient first.
    fn extract_keywords(&self, text: &str, top_k: usize) -> Vec<Keyword>;
}

/// Chinese segmentation backed by jieba, with TF-IDF keyword extraction.
///
/// Loading the dictionary takes a noticeable amount of time, so build one
/// instance at startup and share it.
pub struct JiebaTokenizer {
    jieba: Jieba,
    tfidf: TfIdf,
}

impl JiebaTokenizer {
    pub fn new() -> Self {
        Self {
            jieba: Jieba::new(),
            tfidf: TfIdf::default(),
        }
    }
}

impl Default for JiebaTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for JiebaTokenizer {
    fn segment(&self, text: &str) -> Vec<String> {
        self.jieba
            .cut(text, true)
            .into_iter()
            .filter(|w| !w.trim().is_empty())
            .map(str::to_string)
            .collect()
    }

    fn extract_keywords(&self, text: &str, top_k: usize) -> Vec<Keyword> {
        self.tfidf
            .extract_keywords(&self.jieba, text, top_k, vec![])
            .into_iter()
            .map(|k| Keyword {
                word: k.keyword,
                weight: k.weight,
            })
            .collect()
    }
}

/// Tokenizer for text that is already segmented with spaces.
///
/// Tokens are split on whitespace with surrounding punctuation removed.
/// Keywords are ranked by frequency (first occurrence breaks ties),
/// skipping single-character tokens and stopwords.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn segment(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|w| w.trim_matches(is_lyric_punctuation))
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn extract_keywords(&self, text: &str, top_k: usize) -> Vec<Keyword> {
        let tokens = self.segment(text);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (position, token) in tokens.iter().enumerate() {
            if token.chars().count() < 2 || STOPWORDS.contains(token.as_str()) {
                continue;
            }
            counts.entry(token.as_str()).or_insert((0, position)).0 += 1;
        }

        let mut ranked: Vec<(&str, usize, usize)> = counts
            .into_iter()
            .map(|(word, (count, first))| (word, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        let total = tokens.len() as f64;
        ranked
            .into_iter()
            .take(top_k)
            .map(|(word, count, _)| Keyword {
                word: word.to_string(),
                weight: count as f64 / total,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_segment_strips_punctuation() {
        let tokens = WhitespaceTokenizer.segment("思念 你，\n 回忆 。 过去!");
        assert_eq!(tokens, vec!["思念", "你", "回忆", "过去"]);
    }

    #[test]
    fn test_whitespace_keywords_rank_by_frequency() {
        let keywords = WhitespaceTokenizer.extract_keywords("梦想 的 坚持 梦想 我 坚持 梦想 爱", 5);
        let words: Vec<&str> = keywords.iter().map(|k| k.word.as_str()).collect();
        // "的", "我" are stopwords, "爱" is a single character
        assert_eq!(words, vec!["梦想", "坚持"]);
        assert!((keywords[0].weight - 3.0 / 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_whitespace_keywords_tie_keeps_first_occurrence() {
        let keywords = WhitespaceTokenizer.extract_keywords("远方 城市 远方 城市", 1);
        assert_eq!(keywords.len(), 1);
        assert_eq!(keywords[0].word, "远方");
    }

    #[test]
    fn test_whitespace_keywords_empty_text() {
        assert!(WhitespaceTokenizer.extract_keywords("  ", 5).is_empty());
    }
}
