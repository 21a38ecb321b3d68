//! HTTP client for NetEase-style music catalog APIs.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{CatalogError, ExternalCatalog};
use crate::recommend::{CandidateSong, SongSource};

pub const DEFAULT_PLATFORM: &str = "netease";

lazy_static! {
    static ref LRC_TIMESTAMP: Regex =
        Regex::new(r"\[\d{2}:\d{2}[.:]\d{2,3}\]").expect("valid timestamp regex");
    static ref BRACKETED_CREDIT: Regex =
        Regex::new(r"\[[^\]]*?(作词|作曲|编曲|制作人|监制)[^\]]*?\]").expect("valid credit regex");
    static ref CREDIT_LINE: Regex =
        Regex::new(r"^(作词|作曲|编曲|制作人|监制)\s*[:：]").expect("valid credit line regex");
}

/// Strip LRC timestamps and credit lines, leaving one lyric line per row.
pub fn clean_lrc(raw: &str) -> String {
    let without_timestamps = LRC_TIMESTAMP.replace_all(raw, "");
    let without_credits = BRACKETED_CREDIT.replace_all(&without_timestamps, "");
    without_credits
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !CREDIT_LINE.is_match(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Catalog client for the `search/get` and `song/lyric` endpoints.
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
    platform: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    code: i64,
    result: Option<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    #[serde(default)]
    songs: Vec<ApiSong>,
}

#[derive(Deserialize)]
struct ApiSong {
    id: u64,
    name: String,
    #[serde(default)]
    artists: Vec<ApiArtist>,
}

#[derive(Deserialize)]
struct ApiArtist {
    name: String,
}

#[derive(Deserialize)]
struct LyricResponse {
    lrc: Option<LrcBody>,
}

#[derive(Deserialize)]
struct LrcBody {
    lyric: Option<String>,
}

fn map_request_error(e: reqwest::Error) -> CatalogError {
    if e.is_timeout() {
        CatalogError::Timeout
    } else {
        CatalogError::Connection(e.to_string())
    }
}

impl HttpCatalogClient {
    /// Create a client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the API (e.g., "https://music.163.com")
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Connection(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            platform: DEFAULT_PLATFORM.to_string(),
        })
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidResponse(format!("Failed to parse {}: {}", path, e)))
    }
}

#[async_trait]
impl ExternalCatalog for HttpCatalogClient {
    fn platform(&self) -> &str {
        &self.platform
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<CandidateSong>, CatalogError> {
        let params = [
            ("s", query.to_string()),
            ("type", "1".to_string()),
            ("limit", limit.to_string()),
            ("offset", "0".to_string()),
        ];
        let body: SearchResponse = self.get_json("/api/search/get", &params).await?;
        if body.code != 200 {
            return Err(CatalogError::Api {
                status: u16::try_from(body.code).unwrap_or(0),
                message: "search returned a non-200 code".to_string(),
            });
        }

        let songs: Vec<CandidateSong> = body
            .result
            .map(|r| r.songs)
            .unwrap_or_default()
            .into_iter()
            .take(limit)
            .map(|song| {
                let artist = song
                    .artists
                    .iter()
                    .map(|a| a.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                CandidateSong::new(song.id.to_string(), song.name, artist).with_source(
                    SongSource::External {
                        platform: self.platform.clone(),
                    },
                )
            })
            .collect();
        debug!(query, found = songs.len(), "Catalog search finished");
        Ok(songs)
    }

    async fn fetch_lyrics(&self, song_id: &str) -> Result<Option<String>, CatalogError> {
        let params = [
            ("id", song_id.to_string()),
            ("lv", "-1".to_string()),
            ("tv", "-1".to_string()),
        ];
        let body: LyricResponse = self.get_json("/api/song/lyric", &params).await?;
        let lyrics = body
            .lrc
            .and_then(|l| l.lyric)
            .map(|raw| clean_lrc(&raw))
            .filter(|text| !text.is_empty());
        Ok(lyrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_lrc_strips_timestamps_and_credits() {
        let raw = "[00:00.000] 作词 : 某人\n[00:01.00] 作曲：某人\n[00:12.345]天空 很 蓝\n\n[00:15.12]海 很 深\n[制作人：某人]";
        assert_eq!(clean_lrc(raw), "天空 很 蓝\n海 很 深");
    }

    #[test]
    fn test_clean_lrc_keeps_plain_text() {
        assert_eq!(clean_lrc("  第一行\n第二行  "), "第一行\n第二行");
        assert_eq!(clean_lrc("[00:00.00]"), "");
    }

    #[test]
    fn test_search_response_parsing() {
        let body: SearchResponse = serde_json::from_str(
            r#"{"code": 200, "result": {"songs": [{"id": 42, "name": "晴天", "artists": [{"name": "甲"}, {"name": "乙"}], "album": {"name": "x"}}]}}"#,
        )
        .unwrap();
        let songs = body.result.unwrap().songs;
        assert_eq!(songs[0].id, 42);
        assert_eq!(songs[0].artists.len(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_connection_error() {
        let client =
            HttpCatalogClient::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        let result = client.search("天空", 5).await;
        assert!(matches!(
            result,
            Err(CatalogError::Connection(_)) | Err(CatalogError::Timeout)
        ));
    }
}
