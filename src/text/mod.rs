//! Text-processing collaborators.
//!
//! The scorers never segment text or look up pronunciations themselves;
//! they go through the traits defined here so the backends can be swapped
//! (jieba for Chinese, whitespace splitting for pre-segmented text, fixed
//! fakes in tests).

mod phonetic;
mod tokenizer;

pub use phonetic::{PhoneticLookup, PinyinLookup};
pub use tokenizer::{JiebaTokenizer, Keyword, Tokenizer, WhitespaceTokenizer};

use std::collections::HashSet;

lazy_static::lazy_static! {
    /// Function words ignored by content similarity and frequency keywords.
    pub static ref STOPWORDS: HashSet<&'static str> = [
        "的", "了", "在", "是", "我", "你", "他", "她", "它", "这", "那", "有", "和", "与", "或",
    ]
    .into_iter()
    .collect();
}

/// Continuous sentiment estimate for a piece of text.
///
/// Implementations return a value in `[0, 1]` where 0.5 is neutral and
/// values closer to 1 are more positive.
pub trait PolarityEstimator: Send + Sync {
    fn score(&self, text: &str) -> f64;
}

/// Punctuation stripped from tokens and ignored when counting syllables.
pub fn is_lyric_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '，' | '。' | '、' | '；' | '：' | '？' | '！' | '…' | '—' | '·' | '～'
                | '“' | '”' | '‘' | '’' | '（' | '）' | '《' | '》' | '「' | '」'
                | '【' | '】'
        )
}
