use serde::Serialize;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

use crate::lyric::Lyric;
use crate::text::{is_lyric_punctuation, PhoneticLookup};

/// Finals that rhyme with each other even when they differ.
const RHYME_GROUPS: [&[&str]; 13] = [
    &["a", "ia", "ua"],
    &["o", "uo"],
    &["e", "ie", "ue", "üe"],
    &["i", "ai", "ei", "ui", "üi"],
    &["u", "ou", "iu"],
    &["ü"],
    &["an", "ian", "uan", "üan"],
    &["en", "in", "un", "ün"],
    &["ang", "iang", "uang"],
    &["eng", "ing", "ong", "iong"],
    &["ao", "iao"],
    &["ei", "uei"],
    &["ou", "iou"],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RhymeScheme {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "AABB")]
    Aabb,
    #[serde(rename = "ABAB")]
    Abab,
    #[serde(rename = "AAAA")]
    Aaaa,
    #[serde(rename = "free")]
    Free,
}

impl RhymeScheme {
    pub fn label(self) -> &'static str {
        match self {
            RhymeScheme::None => "无押韵",
            RhymeScheme::Aabb => "AABB",
            RhymeScheme::Abab => "ABAB",
            RhymeScheme::Aaaa => "AAAA",
            RhymeScheme::Free => "自由押韵",
        }
    }
}

impl std::fmt::Display for RhymeScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RhymePair {
    pub line1: usize,
    pub line2: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RhymePattern {
    pub scheme: RhymeScheme,
    pub pairs: Vec<RhymePair>,
    pub quality: f64,
    pub total_lines: usize,
    pub rhyme_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyllableAnalysis {
    pub counts: Vec<usize>,
    pub mean: f64,
    pub consistency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RhythmAnalysis {
    pub pattern: RhymePattern,
    pub syllables: SyllableAnalysis,
    pub overall_score: f64,
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Strip pinyin tone marks and write `v` as `ü`.
pub fn strip_tones(final_sound: &str) -> String {
    final_sound
        .chars()
        .map(|c| match c {
            'ā' | 'á' | 'ǎ' | 'à' => 'a',
            'ē' | 'é' | 'ě' | 'è' => 'e',
            'ī' | 'í' | 'ǐ' | 'ì' => 'i',
            'ō' | 'ó' | 'ǒ' | 'ò' => 'o',
            'ū' | 'ú' | 'ǔ' | 'ù' => 'u',
            'ǖ' | 'ǘ' | 'ǚ' | 'ǜ' | 'v' => 'ü',
            other => other,
        })
        .collect()
}

/// Detects rhymes between line endings and scores rhythm regularity.
///
/// Without a phonetic lookup, the last character itself stands in for
/// its final, so only lines ending on the same character rhyme.
#[derive(Clone, Default)]
pub struct RhymeAnalyzer {
    phonetic: Option<Arc<dyn PhoneticLookup>>,
}

impl RhymeAnalyzer {
    pub fn new(phonetic: Arc<dyn PhoneticLookup>) -> Self {
        Self {
            phonetic: Some(phonetic),
        }
    }

    pub fn without_phonetics() -> Self {
        Self { phonetic: None }
    }

    pub fn final_sound(&self, line: &str) -> String {
        let Some(last) = line.trim().chars().last() else {
            return String::new();
        };
        match &self.phonetic {
            Some(lookup) => match lookup.final_sound(last) {
                Some(final_sound) => strip_tones(&final_sound),
                None => last.to_string(),
            },
            None => last.to_string(),
        }
    }

    pub fn rhymes(&self, a: &str, b: &str) -> bool {
        if a.trim().is_empty() || b.trim().is_empty() {
            return false;
        }
        finals_rhyme(&self.final_sound(a), &self.final_sound(b))
    }

    pub fn analyze_pattern(&self, lyric: &Lyric) -> RhymePattern {
        let lines = lyric.lines();
        if lines.len() < 2 {
            return RhymePattern {
                scheme: RhymeScheme::None,
                pairs: Vec::new(),
                quality: 0.0,
                total_lines: lines.len(),
                rhyme_count: 0,
            };
        }

        let finals: Vec<String> = lines.iter().map(|l| self.final_sound(l)).collect();
        let pairs: Vec<RhymePair> = finals
            .windows(2)
            .enumerate()
            .filter(|(_, w)| finals_rhyme(&w[0], &w[1]))
            .map(|(i, _)| RhymePair {
                line1: i,
                line2: i + 1,
            })
            .collect();

        let quality = round2(pairs.len() as f64 / (lines.len() - 1) as f64);
        RhymePattern {
            scheme: classify_scheme(lines.len(), &pairs),
            rhyme_count: pairs.len(),
            pairs,
            quality,
            total_lines: lines.len(),
        }
    }

    pub fn analyze_syllables(&self, lyric: &Lyric) -> SyllableAnalysis {
        let counts: Vec<usize> = lyric.lines().iter().map(|l| syllable_count(l)).collect();
        let mean = if counts.is_empty() {
            0.0
        } else {
            round2(counts.iter().sum::<usize>() as f64 / counts.len() as f64)
        };
        SyllableAnalysis {
            consistency: consistency(&counts),
            counts,
            mean,
        }
    }

    pub fn analyze(&self, lyric: &Lyric) -> RhythmAnalysis {
        let pattern = self.analyze_pattern(lyric);
        let syllables = self.analyze_syllables(lyric);
        let overall_score = round2((pattern.quality + syllables.consistency) / 2.0);
        RhythmAnalysis {
            pattern,
            syllables,
            overall_score,
        }
    }
}

fn finals_rhyme(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }
    if RHYME_GROUPS
        .iter()
        .any(|group| group.contains(&a) && group.contains(&b))
    {
        return true;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    a_chars.len() >= 2
        && b_chars.len() >= 2
        && a_chars[a_chars.len() - 2..] == b_chars[b_chars.len() - 2..]
}

/// Name the scheme formed by the rhyming line pairs of a lyric.
///
/// Only the first four lines are inspected; any other rhyme makes the
/// scheme free. AABB is checked first and its pairs are a subset of AAAA's,
/// so a fully rhyming quatrain always reports AABB.
pub fn classify_scheme(line_count: usize, pairs: &[RhymePair]) -> RhymeScheme {
    if pairs.is_empty() {
        return RhymeScheme::None;
    }
    let has = |line1: usize, line2: usize| pairs.contains(&RhymePair { line1, line2 });

    if line_count >= 4 {
        if has(0, 1) && has(2, 3) {
            return RhymeScheme::Aabb;
        }
        if has(0, 2) && has(1, 3) {
            return RhymeScheme::Abab;
        }
        if (0..3).all(|i| has(i, i + 1)) {
            return RhymeScheme::Aaaa;
        }
    }
    RhymeScheme::Free
}

fn syllable_count(line: &str) -> usize {
    line.graphemes(true)
        .filter(|g| {
            !g.chars()
                .all(|c| c.is_whitespace() || is_lyric_punctuation(c))
        })
        .count()
}

fn consistency(counts: &[usize]) -> f64 {
    if counts.len() < 2 {
        return 1.0;
    }
    let max = counts.iter().copied().max().unwrap_or(0) as f64;
    if max == 0.0 {
        return 1.0;
    }
    let n = counts.len() as f64;
    let mean = counts.iter().sum::<usize>() as f64 / n;
    let variance = counts
        .iter()
        .map(|&c| (c as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    round2((1.0 - variance.sqrt() / max).max(0.0))
}
