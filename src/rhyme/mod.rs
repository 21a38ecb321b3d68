//! Rhyme and rhythm analysis.

mod analyzer;

pub use analyzer::{
    classify_scheme, strip_tones, RhymeAnalyzer, RhymePair, RhymePattern, RhymeScheme,
    RhythmAnalysis, SyllableAnalysis,
};
pub(crate) use analyzer::round2;
