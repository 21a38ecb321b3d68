use std::sync::Arc;

use super::lexicon::{emotions_for_word, SentimentCategory};
use crate::text::{PolarityEstimator, Tokenizer};

/// Polarity from positive and negative emotion-lexicon hits.
///
/// `0.5 + 0.5 * (pos - neg) / (pos + neg + 1)`, so text without any
/// lexicon word scores exactly neutral.
pub struct LexiconPolarity {
    tokenizer: Arc<dyn Tokenizer>,
}

impl LexiconPolarity {
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self { tokenizer }
    }
}

impl PolarityEstimator for LexiconPolarity {
    fn score(&self, text: &str) -> f64 {
        let mut positive = 0usize;
        let mut negative = 0usize;
        for token in self.tokenizer.segment(text) {
            for emotion in emotions_for_word(&token) {
                match emotion.category() {
                    SentimentCategory::Positive => positive += 1,
                    SentimentCategory::Negative => negative += 1,
                    SentimentCategory::Neutral => {}
                }
            }
        }
        let (pos, neg) = (positive as f64, negative as f64);
        0.5 + 0.5 * (pos - neg) / (pos + neg + 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::WhitespaceTokenizer;

    fn estimator() -> LexiconPolarity {
        LexiconPolarity::new(Arc::new(WhitespaceTokenizer))
    }

    #[test]
    fn test_no_lexicon_words_is_neutral() {
        assert_eq!(estimator().score("桌子 椅子"), 0.5);
        assert_eq!(estimator().score(""), 0.5);
    }

    #[test]
    fn test_positive_and_negative_hits() {
        // 快乐 is joyful only: 0.5 + 0.5 * 1/2
        assert!((estimator().score("快乐") - 0.75).abs() < 1e-9);
        // 孤独 is lonely only: 0.5 - 0.5 * 1/2
        assert!((estimator().score("孤独") - 0.25).abs() < 1e-9);
        // 平静 is peaceful and calm, both neutral
        assert_eq!(estimator().score("平静"), 0.5);
    }

    #[test]
    fn test_score_stays_in_range() {
        let text = "快乐 开心 喜悦 欢快 愉悦 欣喜 高兴";
        let score = estimator().score(text);
        assert!(score > 0.9 && score < 1.0);
    }
}
