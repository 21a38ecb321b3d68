use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::taxonomy::Theme;
use crate::lyric::Lyric;
use crate::text::{Keyword, Tokenizer};

pub const MAX_THEMES: usize = 10;
pub const ANALYSIS_KEYWORDS: usize = 20;
pub const WORD_CLOUD_SIZE: usize = 30;

const PERSON_MARKERS: [&str; 6] = ["你", "我", "他", "她", "我们", "你们"];
const SCENE_MARKERS: [&str; 10] = ["夜", "雨", "风", "海", "山", "城市", "街", "房间", "窗", "门"];
const MAX_ENTITIES: usize = 10;
const MAX_EMOTION_WORDS: usize = 15;

/// Weights of the raw theme score
/// `matches * match_weight + keyword_ratio * keyword_ratio_weight + word_ratio * word_ratio_weight`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThemeWeights {
    pub match_weight: f64,
    pub keyword_ratio_weight: f64,
    pub word_ratio_weight: f64,
}

impl Default for ThemeWeights {
    fn default() -> Self {
        Self {
            match_weight: 0.6,
            keyword_ratio_weight: 10.0,
            word_ratio_weight: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeScore {
    pub theme: Theme,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Entities {
    pub persons: Vec<String>,
    pub scenes: Vec<String>,
    pub emotion_words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordCloudEntry {
    pub word: String,
    pub size: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeAnalysis {
    pub keywords: Vec<Keyword>,
    pub themes: Vec<ThemeScore>,
    pub entities: Entities,
    pub word_cloud: Vec<WordCloudEntry>,
    pub primary_theme: Option<Theme>,
}

#[derive(Clone)]
pub struct ThemeClassifier {
    tokenizer: Arc<dyn Tokenizer>,
    weights: ThemeWeights,
}

impl ThemeClassifier {
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self::with_weights(tokenizer, ThemeWeights::default())
    }

    pub fn with_weights(tokenizer: Arc<dyn Tokenizer>, weights: ThemeWeights) -> Self {
        Self { tokenizer, weights }
    }

    /// Themes whose keywords occur in the lyric, best first.
    ///
    /// Scores are normalized so the best theme scores exactly 1.0. Equal
    /// scores keep taxonomy order. At most [`MAX_THEMES`] are returned.
    pub fn score_themes(&self, lyric: &Lyric) -> Vec<ThemeScore> {
        let tokens = self.tokenizer.segment(&lyric.text());
        self.score_tokens(&tokens)
    }

    fn score_tokens(&self, tokens: &[String]) -> Vec<ThemeScore> {
        let total_tokens = tokens.len();
        let mut frequency: HashMap<&str, usize> = HashMap::new();
        for token in tokens {
            *frequency.entry(token.as_str()).or_default() += 1;
        }

        let mut raw: Vec<ThemeScore> = Vec::new();
        for theme in Theme::ALL {
            let keywords = theme.keywords();
            let mut matched = 0usize;
            let mut total_matches = 0usize;
            for keyword in keywords {
                if let Some(count) = frequency.get(keyword) {
                    matched += 1;
                    total_matches += count;
                }
            }
            if matched == 0 {
                continue;
            }

            let keyword_ratio = matched as f64 / keywords.len() as f64;
            let word_ratio = if total_tokens > 0 {
                total_matches as f64 / total_tokens as f64
            } else {
                0.0
            };
            let score = total_matches as f64 * self.weights.match_weight
                + keyword_ratio * self.weights.keyword_ratio_weight
                + word_ratio * self.weights.word_ratio_weight;
            raw.push(ThemeScore { theme, score });
        }

        raw.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        let top = match raw.first() {
            Some(first) if first.score > 0.0 => first.score,
            Some(_) => {
                return raw
                    .into_iter()
                    .take(MAX_THEMES)
                    .map(|t| ThemeScore { score: 0.0, ..t })
                    .collect()
            }
            None => return raw,
        };

        raw.into_iter()
            .take(MAX_THEMES)
            .map(|t| ThemeScore {
                theme: t.theme,
                score: t.score / top,
            })
            .collect()
    }

    pub fn top_keywords(&self, lyric: &Lyric, k: usize) -> Vec<Keyword> {
        self.tokenizer.extract_keywords(&lyric.text(), k)
    }

    pub fn extract_entities(&self, lyric: &Lyric) -> Entities {
        let tokens = self.tokenizer.segment(&lyric.text());
        entities_from_tokens(&tokens)
    }

    /// Keywords, themes, entities and word cloud in one pass.
    pub fn analyze(&self, lyric: &Lyric) -> ThemeAnalysis {
        let text = lyric.text();
        let tokens = self.tokenizer.segment(&text);
        let keywords = self.tokenizer.extract_keywords(&text, ANALYSIS_KEYWORDS);
        let themes = self.score_tokens(&tokens);
        let entities = entities_from_tokens(&tokens);

        let word_cloud = keywords
            .iter()
            .take(WORD_CLOUD_SIZE)
            .map(|k| WordCloudEntry {
                word: k.word.clone(),
                size: (k.weight * 100.0) as i64,
            })
            .collect();
        let primary_theme = themes.first().map(|t| t.theme);

        ThemeAnalysis {
            keywords,
            themes,
            entities,
            word_cloud,
            primary_theme,
        }
    }
}

fn distinct_containing(tokens: &[String], markers: &[&str]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    tokens
        .iter()
        .map(String::as_str)
        .filter(|t| markers.iter().any(|m| t.contains(m)))
        .filter(|t| seen.insert(*t))
        .take(MAX_ENTITIES)
        .map(str::to_string)
        .collect()
}

fn entities_from_tokens(tokens: &[String]) -> Entities {
    let emotion_words = tokens
        .iter()
        .filter(|t| {
            Theme::ALL
                .iter()
                .any(|theme| theme.core_keywords().contains(&t.as_str()))
        })
        .take(MAX_EMOTION_WORDS)
        .cloned()
        .collect();

    Entities {
        persons: distinct_containing(tokens, &PERSON_MARKERS),
        scenes: distinct_containing(tokens, &SCENE_MARKERS),
        emotion_words,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::WhitespaceTokenizer;

    fn classifier() -> ThemeClassifier {
        ThemeClassifier::new(Arc::new(WhitespaceTokenizer))
    }

    #[test]
    fn test_top_theme_is_exactly_one() {
        let lyric = Lyric::parse("我 爱 你 思念 你\n梦想 在 远方");
        let themes = classifier().score_themes(&lyric);
        assert!(!themes.is_empty());
        assert_eq!(themes[0].score, 1.0);
        assert_eq!(themes[0].theme, Theme::Love);
        assert!(themes.iter().all(|t| t.score > 0.0 && t.score <= 1.0));
    }

    #[test]
    fn test_raw_score_formula() {
        // Love: one keyword of 14 matched twice, Night: one keyword of 8
        // matched once, 4 tokens in total
        let lyric = Lyric::parse("爱 爱 夜 桌子");
        let themes = classifier().score_themes(&lyric);
        let love = 2.0 * 0.6 + (1.0 / 14.0) * 10.0 + (2.0 / 4.0) * 100.0;
        let night = 1.0 * 0.6 + (1.0 / 8.0) * 10.0 + (1.0 / 4.0) * 100.0;
        assert_eq!(themes.len(), 2);
        assert_eq!(themes[0].theme, Theme::Love);
        assert_eq!(themes[1].theme, Theme::Night);
        assert!((themes[1].score - night / love).abs() < 1e-9);
    }

    #[test]
    fn test_equal_scores_keep_taxonomy_order() {
        // Freedom and Travel both have 8 keywords
        let lyric = Lyric::parse("自由 旅行");
        let themes = classifier().score_themes(&lyric);
        assert_eq!(themes[0].theme, Theme::Freedom);
        assert_eq!(themes[1].theme, Theme::Travel);
        assert_eq!(themes[1].score, 1.0);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(classifier().score_themes(&Lyric::parse("桌子 椅子")).is_empty());
        assert!(classifier().score_themes(&Lyric::default()).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let lyric = Lyric::parse("风 雨 夜 城市 霓虹 回忆 朋友 一起 笑 泪");
        let first = classifier().score_themes(&lyric);
        for _ in 0..5 {
            assert_eq!(classifier().score_themes(&lyric), first);
        }
        assert!(first.len() <= MAX_THEMES);
    }

    #[test]
    fn test_extract_entities() {
        let lyric = Lyric::parse("我们 在 雨夜 街头\n我们 的 爱 和 泪\n你 的 窗");
        let entities = classifier().extract_entities(&lyric);
        assert_eq!(entities.persons, vec!["我们", "你"]);
        assert_eq!(entities.scenes, vec!["雨夜", "街头", "窗"]);
        assert_eq!(entities.emotion_words, vec!["爱", "泪"]);
    }

    #[test]
    fn test_analyze_bundles_everything() {
        let lyric = Lyric::parse("梦想 梦想 坚持\n远方 的 梦想");
        let analysis = classifier().analyze(&lyric);
        assert_eq!(analysis.primary_theme, Some(Theme::Inspiration));
        assert_eq!(analysis.keywords[0].word, "梦想");
        // 3 of 6 tokens
        assert_eq!(analysis.word_cloud[0].size, 50);

        let empty = classifier().analyze(&Lyric::parse("桌子"));
        assert_eq!(empty.primary_theme, None);
    }
}
