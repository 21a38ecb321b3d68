use serde::Serialize;
use std::collections::HashMap;

use crate::lyric::Lyric;
use crate::rhyme::round2;

pub const SECTION_LINES: usize = 4;
const CHORUS_LINES: usize = 3;

/// Role of a section in the song. Fixed-size chunking only ever yields verses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SectionKind {
    #[serde(rename = "主歌")]
    Verse,
}

/// A run of consecutive lines, `start..=end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub start: usize,
    pub end: usize,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongStructure {
    pub total_lines: usize,
    pub unique_lines: usize,
    pub repetition_rate: f64,
    pub likely_chorus: Vec<String>,
    pub sections: Vec<Section>,
}

/// Guess the song layout from repeated lines.
pub fn analyze_structure(lyric: &Lyric) -> SongStructure {
    let lines = lyric.lines();

    let mut frequency: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();
    for line in lines {
        let count = frequency.entry(line.as_str()).or_default();
        if *count == 0 {
            first_seen.push(line.as_str());
        }
        *count += 1;
    }

    let repeated: Vec<&str> = first_seen
        .iter()
        .copied()
        .filter(|line| frequency.get(line).copied().unwrap_or(0) > 1)
        .collect();

    let repetition_rate = if lines.is_empty() {
        0.0
    } else {
        round2(repeated.len() as f64 / lines.len() as f64)
    };

    let sections = lines
        .chunks(SECTION_LINES)
        .enumerate()
        .map(|(i, chunk)| {
            let start = i * SECTION_LINES;
            Section {
                kind: SectionKind::Verse,
                start,
                end: start + chunk.len() - 1,
                lines: chunk.to_vec(),
            }
        })
        .collect();

    SongStructure {
        total_lines: lines.len(),
        unique_lines: first_seen.len(),
        repetition_rate,
        likely_chorus: repeated
            .iter()
            .take(CHORUS_LINES)
            .map(|l| l.to_string())
            .collect(),
        sections,
    }
}
