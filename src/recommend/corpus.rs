//! In-process corpus of local songs used when no external catalog answers.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

use super::models::CandidateSong;

/// Append-only list of songs shared between rankers.
///
/// Readers take a [`snapshot`](SongCorpus::snapshot) and rank it without
/// holding the lock.
#[derive(Default)]
pub struct SongCorpus {
    songs: RwLock<Vec<Arc<CandidateSong>>>,
}

impl SongCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_songs(songs: impl IntoIterator<Item = CandidateSong>) -> Self {
        Self {
            songs: RwLock::new(songs.into_iter().map(Arc::new).collect()),
        }
    }

    /// The three built-in sample songs.
    pub fn with_samples() -> Self {
        Self::from_songs(sample_songs())
    }

    /// Load songs from a JSON array of [`CandidateSong`].
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read corpus file: {:?}", path))?;
        let songs: Vec<CandidateSong> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse corpus file: {:?}", path))?;
        info!("Loaded {} songs from {:?}", songs.len(), path);
        Ok(Self::from_songs(songs))
    }

    pub fn add(&self, song: CandidateSong) -> Arc<CandidateSong> {
        let song = Arc::new(song);
        self.songs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(song.clone());
        song
    }

    pub fn snapshot(&self) -> Vec<Arc<CandidateSong>> {
        self.songs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.songs.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn sample_songs() -> Vec<CandidateSong> {
    vec![
        CandidateSong::new("1", "爱情故事", "示例歌手A")
            .with_lyrics("我爱你\n就像爱春天\n你是我心中的\n最美的风景")
            .with_theme("爱情")
            .with_style("流行"),
        CandidateSong::new("2", "追梦人", "示例歌手B")
            .with_lyrics("追逐梦想\n永不放弃\n坚持到底\n成功在望")
            .with_theme("励志")
            .with_style("摇滚"),
        CandidateSong::new("3", "回忆", "示例歌手C")
            .with_lyrics("回忆过去\n那些美好时光\n青春岁月\n永远难忘")
            .with_theme("怀旧")
            .with_style("抒情"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_samples() {
        let corpus = SongCorpus::with_samples();
        assert_eq!(corpus.len(), 3);
        let titles: Vec<String> = corpus.snapshot().iter().map(|s| s.title.clone()).collect();
        assert_eq!(titles, vec!["爱情故事", "追梦人", "回忆"]);
    }

    #[test]
    fn test_snapshot_is_not_affected_by_later_adds() {
        let corpus = SongCorpus::new();
        corpus.add(CandidateSong::new("1", "a", "b"));
        let snapshot = corpus.snapshot();
        corpus.add(CandidateSong::new("2", "c", "d"));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn test_concurrent_adds() {
        let corpus = Arc::new(SongCorpus::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let corpus = corpus.clone();
                std::thread::spawn(move || {
                    corpus.add(CandidateSong::new(i.to_string(), "t", "a"));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(corpus.len(), 8);
    }

    #[test]
    fn test_load_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "10", "title": "海", "artist": "甲", "lyrics": "大海 蓝", "style": "民谣"}}]"#
        )
        .unwrap();
        let corpus = SongCorpus::load_json(file.path()).unwrap();
        let songs = corpus.snapshot();
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].style.as_deref(), Some("民谣"));
    }

    #[test]
    fn test_load_json_bad_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(SongCorpus::load_json(file.path()).is_err());
        assert!(SongCorpus::load_json(Path::new("/nonexistent/corpus.json")).is_err());
    }
}
