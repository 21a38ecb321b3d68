mod file_config;

pub use file_config::{FileConfig, WeightsConfig};

use anyhow::{bail, Result};
use clap::ValueEnum;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::catalog::DEFAULT_PLATFORM;
use crate::recommend::{ContentSimilarity, FusionWeights, UserPreferences};
use crate::theme::ThemeWeights;

pub const DEFAULT_CATALOG_TIMEOUT_SEC: u64 = 10;

/// Text segmentation backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TokenizerKind {
    /// Chinese word segmentation
    #[default]
    Jieba,
    /// Text that is already split by whitespace
    Whitespace,
}

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub catalog_url: Option<String>,
    pub catalog_timeout_sec: u64,
    pub platform: Option<String>,
    pub corpus_path: Option<PathBuf>,
    pub tokenizer: TokenizerKind,
    pub content_similarity: ContentSimilarity,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            catalog_url: None,
            catalog_timeout_sec: DEFAULT_CATALOG_TIMEOUT_SEC,
            platform: None,
            corpus_path: None,
            tokenizer: TokenizerKind::default(),
            content_similarity: ContentSimilarity::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog_url: Option<String>,
    pub catalog_timeout_sec: u64,
    pub platform: String,
    /// JSON corpus file, built-in samples when unset
    pub corpus_path: Option<PathBuf>,
    pub tokenizer: TokenizerKind,
    pub content_similarity: ContentSimilarity,

    pub fusion: FusionWeights,
    pub theme_weights: ThemeWeights,
    pub users: HashMap<String, UserPreferences>,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let catalog_url = file.catalog_url.or_else(|| cli.catalog_url.clone());
        if let Some(url) = &catalog_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                bail!("catalog_url must be an http(s) URL: {}", url);
            }
        }

        let catalog_timeout_sec = file.catalog_timeout_sec.unwrap_or(cli.catalog_timeout_sec);
        if catalog_timeout_sec == 0 {
            bail!("catalog_timeout_sec must be greater than zero");
        }

        let platform = file
            .platform
            .or_else(|| cli.platform.clone())
            .unwrap_or_else(|| DEFAULT_PLATFORM.to_string());

        let corpus_path = file
            .corpus_path
            .map(PathBuf::from)
            .or_else(|| cli.corpus_path.clone());
        if let Some(path) = &corpus_path {
            if !path.is_file() {
                bail!("Corpus file does not exist: {:?}", path);
            }
        }

        let tokenizer = match file.tokenizer {
            Some(s) => match parse_tokenizer(&s) {
                Some(kind) => kind,
                None => bail!("Unknown tokenizer: {} (expected jieba or whitespace)", s),
            },
            None => cli.tokenizer,
        };

        let content_similarity = match file.content_similarity {
            Some(s) => match s.parse::<ContentSimilarity>() {
                Ok(content) => content,
                Err(e) => bail!("{}", e),
            },
            None => cli.content_similarity,
        };

        let weights = file.weights.unwrap_or_default();
        let fusion = resolve_fusion(&weights)?;
        let theme_weights = resolve_theme_weights(&weights)?;

        Ok(Self {
            catalog_url,
            catalog_timeout_sec,
            platform,
            corpus_path,
            tokenizer,
            content_similarity,
            fusion,
            theme_weights,
            users: file.users.unwrap_or_default(),
        })
    }

    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog_timeout_sec)
    }
}

fn resolve_fusion(weights: &WeightsConfig) -> Result<FusionWeights> {
    let defaults = FusionWeights::default();
    let fusion = FusionWeights {
        local_theme: weights.local_theme.unwrap_or(defaults.local_theme),
        local_sentiment: weights.local_sentiment.unwrap_or(defaults.local_sentiment),
        local_content: weights.local_content.unwrap_or(defaults.local_content),
        external_keyword: weights.external_keyword.unwrap_or(defaults.external_keyword),
        external_theme: weights.external_theme.unwrap_or(defaults.external_theme),
        external_content: weights.external_content.unwrap_or(defaults.external_content),
        theme_boost: weights.theme_boost.unwrap_or(defaults.theme_boost),
        style_boost: weights.style_boost.unwrap_or(defaults.style_boost),
        boost_factor: weights.boost_factor.unwrap_or(defaults.boost_factor),
    };

    for (name, value) in [
        ("local_theme", fusion.local_theme),
        ("local_sentiment", fusion.local_sentiment),
        ("local_content", fusion.local_content),
        ("external_keyword", fusion.external_keyword),
        ("external_theme", fusion.external_theme),
        ("external_content", fusion.external_content),
        ("theme_boost", fusion.theme_boost),
        ("style_boost", fusion.style_boost),
        ("boost_factor", fusion.boost_factor),
    ] {
        check_weight(name, value)?;
    }
    Ok(fusion)
}

fn resolve_theme_weights(weights: &WeightsConfig) -> Result<ThemeWeights> {
    let defaults = ThemeWeights::default();
    let theme_weights = ThemeWeights {
        match_weight: weights.theme_match.unwrap_or(defaults.match_weight),
        keyword_ratio_weight: weights
            .theme_keyword_ratio
            .unwrap_or(defaults.keyword_ratio_weight),
        word_ratio_weight: weights.theme_word_ratio.unwrap_or(defaults.word_ratio_weight),
    };
    check_weight("theme_match", theme_weights.match_weight)?;
    check_weight("theme_keyword_ratio", theme_weights.keyword_ratio_weight)?;
    check_weight("theme_word_ratio", theme_weights.word_ratio_weight)?;
    Ok(theme_weights)
}

fn check_weight(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        bail!("weights.{} must be a non-negative number, got {}", name, value);
    }
    Ok(())
}

/// Parses a tokenizer name, case insensitive.
fn parse_tokenizer(s: &str) -> Option<TokenizerKind> {
    TokenizerKind::from_str(s, true).ok()
}
