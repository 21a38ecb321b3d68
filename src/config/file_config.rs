use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::recommend::UserPreferences;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub catalog_url: Option<String>,
    pub catalog_timeout_sec: Option<u64>,
    pub platform: Option<String>,
    pub corpus_path: Option<String>,
    pub tokenizer: Option<String>,
    pub content_similarity: Option<String>,

    pub weights: Option<WeightsConfig>,
    /// Stored preferences keyed by user id
    pub users: Option<HashMap<String, UserPreferences>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct WeightsConfig {
    // Local fusion
    pub local_theme: Option<f64>,
    pub local_sentiment: Option<f64>,
    pub local_content: Option<f64>,
    // External fusion
    pub external_keyword: Option<f64>,
    pub external_theme: Option<f64>,
    pub external_content: Option<f64>,
    // Preference boost
    pub theme_boost: Option<f64>,
    pub style_boost: Option<f64>,
    pub boost_factor: Option<f64>,
    // Raw theme score
    pub theme_match: Option<f64>,
    pub theme_keyword_ratio: Option<f64>,
    pub theme_word_ratio: Option<f64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
