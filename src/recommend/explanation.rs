use super::ranker::LyricProfile;

pub const FALLBACK_EXPLANATION: &str = "基于歌词内容的综合相似度推荐";
const SENTIMENT_MATCH_THRESHOLD: f64 = 0.2;
const MAX_SHARED_THEMES: usize = 2;

/// Describe why a candidate resembles the query.
pub fn explain(query: &LyricProfile, candidate: &LyricProfile) -> String {
    let mut parts = Vec::new();

    let shared: Vec<&str> = query
        .themes
        .iter()
        .filter(|q| candidate.themes.iter().any(|c| c.theme == q.theme))
        .take(MAX_SHARED_THEMES)
        .map(|t| t.theme.name())
        .collect();
    if !shared.is_empty() {
        parts.push(format!("主题相似：都涉及{}", shared.join("、")));
    }

    if (query.mean_polarity - candidate.mean_polarity).abs() < SENTIMENT_MATCH_THRESHOLD {
        parts.push(format!(
            "情感相似：情感基调相似（{} vs {}）",
            query.tone, candidate.tone
        ));
    }

    if parts.is_empty() {
        FALLBACK_EXPLANATION.to_string()
    } else {
        parts.join("；")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::Emotion;
    use crate::theme::{Theme, ThemeScore};

    fn profile(themes: &[Theme], polarity: f64, tone: Emotion) -> LyricProfile {
        LyricProfile {
            tokens: Vec::new(),
            themes: themes
                .iter()
                .map(|t| ThemeScore {
                    theme: *t,
                    score: 1.0,
                })
                .collect(),
            mean_polarity: polarity,
            tone,
            keywords: Vec::new(),
        }
    }

    #[test]
    fn test_theme_and_sentiment_parts() {
        let query = profile(
            &[Theme::Love, Theme::Night, Theme::City],
            0.7,
            Emotion::Upbeat,
        );
        let candidate = profile(&[Theme::City, Theme::Night, Theme::Love], 0.6, Emotion::Neutral);
        assert_eq!(
            explain(&query, &candidate),
            "主题相似：都涉及爱情、夜晚；情感相似：情感基调相似（积极向上 vs 平和中性）"
        );
    }

    #[test]
    fn test_sentiment_only() {
        let query = profile(&[Theme::Love], 0.5, Emotion::Peaceful);
        let candidate = profile(&[], 0.45, Emotion::Peaceful);
        assert_eq!(
            explain(&query, &candidate),
            "情感相似：情感基调相似（平静安宁 vs 平静安宁）"
        );
    }

    #[test]
    fn test_fallback() {
        let query = profile(&[Theme::Love], 0.9, Emotion::Joyful);
        let candidate = profile(&[Theme::Sorrow], 0.2, Emotion::Anguished);
        assert_eq!(explain(&query, &candidate), FALLBACK_EXPLANATION);
    }
}
