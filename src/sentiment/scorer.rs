use serde::Serialize;
use std::sync::Arc;

use super::lexicon::{count_matches, Emotion, SentimentCategory};
use crate::lyric::Lyric;
use crate::text::{PolarityEstimator, Tokenizer};

pub const POSITIVE_THRESHOLD: f64 = 0.6;
pub const NEGATIVE_THRESHOLD: f64 = 0.4;

/// Sentiment of a single line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceSentiment {
    pub text: String,
    pub polarity: f64,
    pub category: SentimentCategory,
    pub emotion: Emotion,
    pub intensity: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryHistogram {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl CategoryHistogram {
    fn record(&mut self, category: SentimentCategory) {
        match category {
            SentimentCategory::Positive => self.positive += 1,
            SentimentCategory::Neutral => self.neutral += 1,
            SentimentCategory::Negative => self.negative += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmotionCount {
    pub emotion: Emotion,
    pub count: usize,
}

/// Human readable band for a mean polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PolarityBand {
    VeryPositive,
    Positive,
    SlightlyPositive,
    Neutral,
    SlightlyNegative,
    Negative,
    VeryNegative,
}

impl PolarityBand {
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity >= 0.7 {
            PolarityBand::VeryPositive
        } else if polarity >= 0.6 {
            PolarityBand::Positive
        } else if polarity >= 0.55 {
            PolarityBand::SlightlyPositive
        } else if polarity >= 0.45 {
            PolarityBand::Neutral
        } else if polarity >= 0.4 {
            PolarityBand::SlightlyNegative
        } else if polarity >= 0.3 {
            PolarityBand::Negative
        } else {
            PolarityBand::VeryNegative
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PolarityBand::VeryPositive => "非常积极",
            PolarityBand::Positive => "较为积极",
            PolarityBand::SlightlyPositive => "中性偏积极",
            PolarityBand::Neutral => "中性",
            PolarityBand::SlightlyNegative => "中性偏消极",
            PolarityBand::Negative => "较为消极",
            PolarityBand::VeryNegative => "非常消极",
        }
    }
}

/// Aggregate sentiment of a whole lyric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LyricSentiment {
    pub lines: Vec<SentenceSentiment>,
    pub mean_polarity: f64,
    pub dominant_emotion: Emotion,
    pub categories: CategoryHistogram,
    /// Emotion counts in order of first appearance.
    pub emotions: Vec<EmotionCount>,
    pub band: PolarityBand,
    pub intensity_curve: Vec<f64>,
}

/// Scores lines and lyrics for polarity and emotion.
///
/// Polarity comes from the [`PolarityEstimator`]; the emotion label comes
/// from lexicon matches over the tokens, falling back to a bucket on the
/// polarity when the lexicon is inconclusive.
#[derive(Clone)]
pub struct SentimentScorer {
    tokenizer: Arc<dyn Tokenizer>,
    polarity: Arc<dyn PolarityEstimator>,
}

impl SentimentScorer {
    pub fn new(tokenizer: Arc<dyn Tokenizer>, polarity: Arc<dyn PolarityEstimator>) -> Self {
        Self {
            tokenizer,
            polarity,
        }
    }

    pub fn score_line(&self, line: &str) -> SentenceSentiment {
        let text = line.trim();
        if text.is_empty() {
            return SentenceSentiment {
                text: String::new(),
                polarity: 0.5,
                category: SentimentCategory::Neutral,
                emotion: Emotion::from_polarity(0.5),
                intensity: 0.0,
            };
        }

        let polarity = clamp_polarity(self.polarity.score(text));
        let tokens = self.tokenizer.segment(text);

        SentenceSentiment {
            text: text.to_string(),
            polarity,
            category: category_for(polarity),
            emotion: classify_emotion(&tokens, polarity),
            intensity: (polarity - 0.5).abs() * 2.0,
        }
    }

    pub fn score_lyric(&self, lyric: &Lyric) -> LyricSentiment {
        let lines: Vec<SentenceSentiment> =
            lyric.lines().iter().map(|l| self.score_line(l)).collect();
        aggregate(lines)
    }
}

fn clamp_polarity(raw: f64) -> f64 {
    if raw.is_nan() {
        0.5
    } else {
        raw.clamp(0.0, 1.0)
    }
}

pub fn category_for(polarity: f64) -> SentimentCategory {
    if polarity >= POSITIVE_THRESHOLD {
        SentimentCategory::Positive
    } else if polarity <= NEGATIVE_THRESHOLD {
        SentimentCategory::Negative
    } else {
        SentimentCategory::Neutral
    }
}

fn agrees_with(category: SentimentCategory, polarity: f64) -> bool {
    match category {
        SentimentCategory::Positive => polarity >= 0.5,
        SentimentCategory::Negative => polarity < 0.5,
        SentimentCategory::Neutral => false,
    }
}

fn classify_emotion<S: AsRef<str>>(tokens: &[S], polarity: f64) -> Emotion {
    let counts = count_matches(tokens);

    // strict comparison keeps the earliest lexicon entry on ties
    let mut best: Option<(Emotion, usize)> = None;
    for (emotion, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((emotion, count));
        }
    }

    match best {
        Some((emotion, count)) if count >= 2 => emotion,
        Some((emotion, _)) if agrees_with(emotion.category(), polarity) => emotion,
        _ => Emotion::from_polarity(polarity),
    }
}

struct EmotionTally {
    emotion: Emotion,
    intensity: f64,
    count: usize,
}

fn aggregate(lines: Vec<SentenceSentiment>) -> LyricSentiment {
    let mean_polarity = if lines.is_empty() {
        0.5
    } else {
        lines.iter().map(|l| l.polarity).sum::<f64>() / lines.len() as f64
    };

    let mut categories = CategoryHistogram::default();
    let mut tallies: Vec<EmotionTally> = Vec::new();
    for line in &lines {
        categories.record(line.category);
        match tallies.iter_mut().find(|t| t.emotion == line.emotion) {
            Some(tally) => {
                tally.intensity += line.intensity;
                tally.count += 1;
            }
            None => tallies.push(EmotionTally {
                emotion: line.emotion,
                intensity: line.intensity,
                count: 1,
            }),
        }
    }

    let mut dominant: Option<&EmotionTally> = None;
    for tally in &tallies {
        let better = match dominant {
            None => true,
            Some(best) => {
                tally.intensity > best.intensity
                    || (tally.intensity == best.intensity && tally.count > best.count)
            }
        };
        if better {
            dominant = Some(tally);
        }
    }
    let dominant_emotion = dominant
        .map(|t| t.emotion)
        .unwrap_or_else(|| Emotion::overall_from_polarity(mean_polarity));

    let emotions = tallies
        .iter()
        .map(|t| EmotionCount {
            emotion: t.emotion,
            count: t.count,
        })
        .collect();
    let intensity_curve = lines.iter().map(|l| l.intensity).collect();

    LyricSentiment {
        lines,
        mean_polarity,
        dominant_emotion,
        categories,
        emotions,
        band: PolarityBand::from_polarity(mean_polarity),
        intensity_curve,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::WhitespaceTokenizer;
    use std::collections::HashMap;

    struct FixedPolarity {
        default: f64,
        by_text: HashMap<&'static str, f64>,
    }

    impl PolarityEstimator for FixedPolarity {
        fn score(&self, text: &str) -> f64 {
            self.by_text.get(text).copied().unwrap_or(self.default)
        }
    }

    fn scorer_with(default: f64, by_text: &[(&'static str, f64)]) -> SentimentScorer {
        SentimentScorer::new(
            Arc::new(WhitespaceTokenizer),
            Arc::new(FixedPolarity {
                default,
                by_text: by_text.iter().copied().collect(),
            }),
        )
    }

    // ========================================================================
    // Line scoring
    // ========================================================================

    #[test]
    fn test_two_matches_win_regardless_of_polarity() {
        let scorer = scorer_with(0.9, &[]);
        let line = scorer.score_line("孤独 的 夜 寂寞 的 我");
        assert_eq!(line.emotion, Emotion::Lonely);
        assert_eq!(line.category, SentimentCategory::Positive);
    }

    #[test]
    fn test_single_match_needs_agreeing_polarity() {
        let scorer = scorer_with(0.2, &[("快乐 的 一天", 0.8)]);
        assert_eq!(scorer.score_line("快乐 的 一天").emotion, Emotion::Joyful);
        // negative polarity disagrees with a positive label
        assert_eq!(scorer.score_line("快乐 的 日子").emotion, Emotion::Anguished);
    }

    #[test]
    fn test_neutral_label_never_agrees() {
        let scorer = scorer_with(0.5, &[]);
        let line = scorer.score_line("回忆 的 街");
        assert_eq!(line.emotion, Emotion::Peaceful);
    }

    #[test]
    fn test_lexicon_order_breaks_ties() {
        let scorer = scorer_with(0.5, &[]);
        // one joyful and one melancholic word, neither wins outright
        let line = scorer.score_line("开心 伤感");
        assert_eq!(line.emotion, Emotion::Joyful);
    }

    #[test]
    fn test_category_and_intensity() {
        let scorer = scorer_with(0.5, &[("a", 0.6), ("b", 0.4), ("c", 0.55), ("d", 1.7)]);
        assert_eq!(scorer.score_line("a").category, SentimentCategory::Positive);
        assert_eq!(scorer.score_line("b").category, SentimentCategory::Negative);
        assert_eq!(scorer.score_line("c").category, SentimentCategory::Neutral);
        let clamped = scorer.score_line("d");
        assert_eq!(clamped.polarity, 1.0);
        assert!((clamped.intensity - 1.0).abs() < 1e-9);
        assert!((scorer.score_line("b").intensity - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_blank_line_is_neutral() {
        let scorer = scorer_with(0.9, &[]);
        let line = scorer.score_line("   ");
        assert_eq!(line.polarity, 0.5);
        assert_eq!(line.category, SentimentCategory::Neutral);
        assert_eq!(line.emotion, Emotion::Peaceful);
        assert_eq!(line.intensity, 0.0);
    }

    // ========================================================================
    // Aggregation
    // ========================================================================

    #[test]
    fn test_empty_lyric_defaults() {
        let scorer = scorer_with(0.9, &[]);
        let result = scorer.score_lyric(&Lyric::default());
        assert_eq!(result.mean_polarity, 0.5);
        assert_eq!(result.dominant_emotion, Emotion::Neutral);
        assert_eq!(result.categories, CategoryHistogram::default());
        assert!(result.emotions.is_empty());
        assert_eq!(result.band, PolarityBand::Neutral);
    }

    #[test]
    fn test_dominant_emotion_weighted_by_intensity() {
        let scorer = scorer_with(0.5, &[("甲", 0.55), ("乙", 0.56), ("丙", 0.1)]);
        let lyric = Lyric::from_lines(["甲", "乙", "丙"]);
        let result = scorer.score_lyric(&lyric);
        // two mild lines share a label, one strong line has another
        assert_eq!(result.lines[0].emotion, Emotion::Neutral);
        assert_eq!(result.lines[1].emotion, Emotion::Neutral);
        assert_eq!(result.lines[2].emotion, Emotion::Anguished);
        assert_eq!(result.dominant_emotion, Emotion::Anguished);
        assert_eq!(
            result.emotions,
            vec![
                EmotionCount {
                    emotion: Emotion::Neutral,
                    count: 2
                },
                EmotionCount {
                    emotion: Emotion::Anguished,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_dominant_tie_prefers_frequency() {
        // 0.75 -> intensity 0.5, 0.625 -> intensity 0.25 twice
        let scorer = scorer_with(0.5, &[("甲", 0.75), ("乙", 0.625)]);
        let lyric = Lyric::from_lines(["甲", "乙", "乙"]);
        let result = scorer.score_lyric(&lyric);
        assert_eq!(result.lines[0].emotion, Emotion::Joyful);
        assert_eq!(result.lines[1].emotion, Emotion::Neutral);
        assert_eq!(result.dominant_emotion, Emotion::Neutral);
    }

    #[test]
    fn test_histograms_and_mean() {
        let scorer = scorer_with(0.5, &[("好", 0.9), ("坏", 0.1)]);
        let lyric = Lyric::from_lines(["好", "坏", "平"]);
        let result = scorer.score_lyric(&lyric);
        assert!((result.mean_polarity - 0.5).abs() < 1e-9);
        assert_eq!(
            result.categories,
            CategoryHistogram {
                positive: 1,
                neutral: 1,
                negative: 1
            }
        );
        assert_eq!(result.intensity_curve.len(), 3);
        assert!(result.mean_polarity >= 0.0 && result.mean_polarity <= 1.0);
    }

    #[test]
    fn test_polarity_band_thresholds() {
        assert_eq!(PolarityBand::from_polarity(0.7), PolarityBand::VeryPositive);
        assert_eq!(PolarityBand::from_polarity(0.65), PolarityBand::Positive);
        assert_eq!(PolarityBand::from_polarity(0.55), PolarityBand::SlightlyPositive);
        assert_eq!(PolarityBand::from_polarity(0.5), PolarityBand::Neutral);
        assert_eq!(PolarityBand::from_polarity(0.42), PolarityBand::SlightlyNegative);
        assert_eq!(PolarityBand::from_polarity(0.3), PolarityBand::Negative);
        assert_eq!(PolarityBand::from_polarity(0.1), PolarityBand::VeryNegative);
        assert_eq!(PolarityBand::Neutral.description(), "中性");
    }
}
