//! Line and lyric sentiment scoring.

mod lexicon;
mod polarity;
mod scorer;

pub use lexicon::{emotions_for_word, Emotion, SentimentCategory, EMOTION_LEXICON};
pub use polarity::LexiconPolarity;
pub use scorer::{
    category_for, CategoryHistogram, EmotionCount, LyricSentiment, PolarityBand,
    SentenceSentiment, SentimentScorer, NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD,
};
