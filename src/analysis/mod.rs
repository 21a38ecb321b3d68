//! Full lyric analysis combining sentiment, themes, rhythm and structure.

mod structure;

pub use structure::{analyze_structure, Section, SectionKind, SongStructure, SECTION_LINES};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::lyric::Lyric;
use crate::rhyme::{RhymeAnalyzer, RhythmAnalysis};
use crate::sentiment::{LyricSentiment, SentimentScorer};
use crate::theme::{ThemeAnalysis, ThemeClassifier};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("lyrics are empty")]
    EmptyLyrics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LyricAnalysis {
    pub sentiment: LyricSentiment,
    pub theme: ThemeAnalysis,
    pub rhythm: RhythmAnalysis,
    pub structure: SongStructure,
    pub summary: String,
}

#[derive(Clone)]
pub struct LyricAnalyzer {
    sentiment: SentimentScorer,
    themes: ThemeClassifier,
    rhyme: RhymeAnalyzer,
}

impl LyricAnalyzer {
    pub fn new(sentiment: SentimentScorer, themes: ThemeClassifier, rhyme: RhymeAnalyzer) -> Self {
        Self {
            sentiment,
            themes,
            rhyme,
        }
    }

    pub fn analyze(&self, text: &str) -> Result<LyricAnalysis, AnalysisError> {
        let lyric = Lyric::parse(text);
        if lyric.is_empty() {
            return Err(AnalysisError::EmptyLyrics);
        }
        debug!(lines = lyric.len(), "Analyzing lyric");

        let sentiment = self.sentiment.score_lyric(&lyric);
        let theme = self.themes.analyze(&lyric);
        let rhythm = self.rhyme.analyze(&lyric);
        let structure = analyze_structure(&lyric);
        let summary = summarize(&sentiment, &theme, &rhythm);

        Ok(LyricAnalysis {
            sentiment,
            theme,
            rhythm,
            structure,
            summary,
        })
    }
}

/// One-line Chinese summary of an analysis.
pub fn summarize(sentiment: &LyricSentiment, theme: &ThemeAnalysis, rhythm: &RhythmAnalysis) -> String {
    let mut parts = vec![format!(
        "整体情感基调：{}（得分：{:.2}）",
        sentiment.dominant_emotion, sentiment.mean_polarity
    )];
    if let Some(top) = theme.themes.first() {
        parts.push(format!("主要主题：{}（匹配度：{:.2}）", top.theme, top.score));
    }
    parts.push(format!(
        "押韵模式：{}，质量评分：{:.2}",
        rhythm.pattern.scheme, rhythm.overall_score
    ));
    parts.join("；")
}
