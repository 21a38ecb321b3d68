//! Lyric text model.

use serde::Serialize;

/// A lyric as an ordered list of non-empty, trimmed lines.
///
/// Line order is preserved and duplicate lines are kept, since repeated
/// lines are what the structure analysis uses to spot a chorus.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Lyric {
    lines: Vec<String>,
}

impl Lyric {
    /// Split raw text on line breaks, trimming each line and dropping blank ones.
    pub fn parse(text: &str) -> Self {
        let lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { lines }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined: Vec<String> = lines
            .into_iter()
            .map(|l| l.as_ref().to_string())
            .collect();
        Self::parse(&joined.join("\n"))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The lyric re-joined with newlines, as fed to tokenizers.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl From<&str> for Lyric {
    fn from(text: &str) -> Self {
        Lyric::parse(text)
    }
}
