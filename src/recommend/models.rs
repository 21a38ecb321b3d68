use serde::{Deserialize, Serialize};

/// Where a candidate song came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SongSource {
    #[default]
    Local,
    External {
        platform: String,
    },
}

/// A song that can be recommended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSong {
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub lyrics: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub source: SongSource,
}

impl CandidateSong {
    pub fn new(id: impl Into<String>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            lyrics: None,
            theme: None,
            style: None,
            source: SongSource::Local,
        }
    }

    pub fn with_lyrics(mut self, lyrics: impl Into<String>) -> Self {
        self.lyrics = Some(lyrics.into());
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_source(mut self, source: SongSource) -> Self {
        self.source = source;
        self
    }

    /// Identity used to merge results from different lookups.
    pub fn dedup_key(&self) -> (String, String) {
        (self.title.clone(), self.artist.clone())
    }

    pub fn lyrics_or_empty(&self) -> &str {
        self.lyrics.as_deref().unwrap_or("")
    }
}

/// Component similarities behind a fused score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarityBreakdown {
    pub theme: f64,
    pub sentiment: f64,
    pub content: f64,
    /// Only computed for external candidates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRecommendation {
    pub song: CandidateSong,
    pub similarity: f64,
    pub breakdown: SimilarityBreakdown,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecommendationSource {
    External { platform: String },
    Local,
}

impl RecommendationSource {
    pub fn label(&self) -> &str {
        match self {
            RecommendationSource::External { .. } => "external",
            RecommendationSource::Local => "local",
        }
    }
}

/// Ranked results tagged with the path that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations {
    pub source: RecommendationSource,
    pub items: Vec<RankedRecommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_song() {
        let song: CandidateSong =
            serde_json::from_str(r#"{"id": "1", "title": "回忆", "artist": "某人"}"#).unwrap();
        assert_eq!(song.source, SongSource::Local);
        assert!(song.lyrics.is_none());
        assert_eq!(song.lyrics_or_empty(), "");
    }

    #[test]
    fn test_external_source_serialization() {
        let song = CandidateSong::new("7", "海", "歌手").with_source(SongSource::External {
            platform: "netease".to_string(),
        });
        let json = serde_json::to_value(&song).unwrap();
        assert_eq!(json["source"]["kind"], "external");
        assert_eq!(json["source"]["platform"], "netease");
    }

    #[test]
    fn test_dedup_key_ignores_id() {
        let a = CandidateSong::new("1", "晴天", "周");
        let b = CandidateSong::new("2", "晴天", "周");
        assert_eq!(a.dedup_key(), b.dedup_key());
    }
}
