//! Emotion labels and the emotion word lexicon.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Broad polarity class of a line or of an emotion label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentCategory {
    Positive,
    Neutral,
    Negative,
}

/// Fine-grained emotion label.
///
/// The first eighteen variants have lexicon entries; the last four are only
/// reachable through the polarity bucket fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Joyful,
    Melancholic,
    Romantic,
    Passionate,
    Peaceful,
    Nostalgic,
    Hopeful,
    Lonely,
    Energetic,
    Mysterious,
    Dreamy,
    Powerful,
    Warm,
    Cool,
    Sad,
    Angry,
    Calm,
    Excited,
    Upbeat,
    Neutral,
    Gloomy,
    Anguished,
}

impl Emotion {
    pub fn category(self) -> SentimentCategory {
        match self {
            Emotion::Joyful
            | Emotion::Hopeful
            | Emotion::Energetic
            | Emotion::Romantic
            | Emotion::Warm
            | Emotion::Excited => SentimentCategory::Positive,
            Emotion::Melancholic | Emotion::Lonely | Emotion::Sad | Emotion::Angry => {
                SentimentCategory::Negative
            }
            _ => SentimentCategory::Neutral,
        }
    }

    /// Chinese label shown to users.
    pub fn display_name(self) -> &'static str {
        match self {
            Emotion::Joyful => "欢快愉悦",
            Emotion::Melancholic => "忧郁悲伤",
            Emotion::Romantic => "浪漫温柔",
            Emotion::Passionate => "激情热烈",
            Emotion::Peaceful => "平静安宁",
            Emotion::Nostalgic => "怀旧追忆",
            Emotion::Hopeful => "充满希望",
            Emotion::Lonely => "孤独寂寞",
            Emotion::Energetic => "活力四射",
            Emotion::Mysterious => "神秘深邃",
            Emotion::Dreamy => "梦幻迷离",
            Emotion::Powerful => "力量磅礴",
            Emotion::Warm => "温暖和煦",
            Emotion::Cool => "清凉冷静",
            Emotion::Sad => "悲伤难过",
            Emotion::Angry => "愤怒激昂",
            Emotion::Calm => "冷静从容",
            Emotion::Excited => "激动兴奋",
            Emotion::Upbeat => "积极向上",
            Emotion::Neutral => "平和中性",
            Emotion::Gloomy => "低沉消极",
            Emotion::Anguished => "悲伤痛苦",
        }
    }

    /// Seven-bucket mapping used when the lexicon does not decide a line.
    pub fn from_polarity(polarity: f64) -> Emotion {
        if polarity >= 0.75 {
            Emotion::Joyful
        } else if polarity >= 0.65 {
            Emotion::Upbeat
        } else if polarity >= 0.55 {
            Emotion::Neutral
        } else if polarity >= 0.45 {
            Emotion::Peaceful
        } else if polarity >= 0.35 {
            Emotion::Melancholic
        } else if polarity >= 0.25 {
            Emotion::Gloomy
        } else {
            Emotion::Anguished
        }
    }

    /// Coarser mapping for a whole lyric's mean polarity.
    pub fn overall_from_polarity(mean: f64) -> Emotion {
        if mean >= 0.7 {
            Emotion::Joyful
        } else if mean >= 0.6 {
            Emotion::Upbeat
        } else if mean <= 0.3 {
            Emotion::Melancholic
        } else if mean <= 0.4 {
            Emotion::Gloomy
        } else {
            Emotion::Neutral
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Emotion lexicon, in tie-breaking order.
pub const EMOTION_LEXICON: [(Emotion, &[&str]); 18] = [
    (Emotion::Joyful, &["快乐", "开心", "喜悦", "欢快", "兴奋", "愉悦", "欣喜", "畅快", "爽朗", "明媚", "欢乐", "高兴", "愉快"]),
    (Emotion::Melancholic, &["忧郁", "悲伤", "哀伤", "凄凉", "落寞", "惆怅", "伤感", "悲凉", "凄美", "黯然", "难过", "痛苦", "伤心"]),
    (Emotion::Romantic, &["浪漫", "温柔", "甜蜜", "温馨", "缠绵", "深情", "柔情", "缱绻", "旖旎", "爱恋", "心动", "情意"]),
    (Emotion::Passionate, &["激情", "热烈", "炽热", "狂热", "奔放", "激昂", "澎湃", "燃烧", "沸腾", "热情"]),
    (Emotion::Peaceful, &["平静", "安宁", "宁静", "祥和", "恬淡", "淡泊", "静谧", "悠然", "舒缓", "平和", "安静"]),
    (Emotion::Nostalgic, &["怀旧", "怀念", "追忆", "回忆", "缅怀", "思念", "眷恋", "留恋", "回味", "追思", "往事", "过去"]),
    (Emotion::Hopeful, &["希望", "期待", "憧憬", "向往", "期盼", "展望", "希冀", "渴望", "盼望", "梦想"]),
    (Emotion::Lonely, &["孤独", "寂寞", "孤单", "孤寂", "落单", "形单影只", "孑然", "孤身", "独处", "孤零", "独自"]),
    (Emotion::Energetic, &["活力", "朝气", "蓬勃", "生机", "活力四射", "充满活力", "精神", "振奋", "昂扬", "活跃"]),
    (Emotion::Mysterious, &["神秘", "深邃", "幽深", "玄妙", "奥秘", "神秘莫测", "深不可测", "幽玄", "玄奥", "未知"]),
    (Emotion::Dreamy, &["梦幻", "朦胧", "迷离", "虚幻", "缥缈", "如幻", "似梦", "迷蒙", "恍惚", "梦境"]),
    (Emotion::Powerful, &["力量", "强大", "有力", "强劲", "雄浑", "磅礴", "震撼", "强烈", "威猛", "雄壮"]),
    (Emotion::Warm, &["温暖", "暖和", "温馨", "暖意", "和煦", "暖阳", "温情", "暖心"]),
    (Emotion::Cool, &["清凉", "清爽", "凉爽", "清冷", "冷静", "淡然"]),
    (Emotion::Sad, &["难过", "伤心", "痛苦", "悲伤", "哀痛", "痛心", "心碎"]),
    (Emotion::Angry, &["愤怒", "生气", "恼火", "愤慨", "怒火", "气愤"]),
    (Emotion::Calm, &["冷静", "镇定", "沉着", "平静", "淡定", "从容"]),
    (Emotion::Excited, &["激动", "兴奋", "振奋", "激昂", "热血", "澎湃"]),
];

lazy_static::lazy_static! {
    /// Word -> emotions listing it, in lexicon order.
    static ref WORD_INDEX: HashMap<&'static str, Vec<Emotion>> = {
        let mut index: HashMap<&'static str, Vec<Emotion>> = HashMap::new();
        for (emotion, words) in EMOTION_LEXICON.iter() {
            for word in words.iter() {
                let entry = index.entry(*word).or_default();
                if !entry.contains(emotion) {
                    entry.push(*emotion);
                }
            }
        }
        index
    };
}

/// Emotions whose lexicon lists `word`.
pub fn emotions_for_word(word: &str) -> &'static [Emotion] {
    WORD_INDEX.get(word).map(Vec::as_slice).unwrap_or(&[])
}

/// Per-emotion match counts for a token sequence, in lexicon order.
pub fn count_matches<S: AsRef<str>>(tokens: &[S]) -> Vec<(Emotion, usize)> {
    let mut counts: HashMap<Emotion, usize> = HashMap::new();
    for token in tokens {
        for emotion in emotions_for_word(token.as_ref()) {
            *counts.entry(*emotion).or_default() += 1;
        }
    }
    EMOTION_LEXICON
        .iter()
        .filter_map(|(emotion, _)| counts.get(emotion).map(|c| (*emotion, *c)))
        .collect()
}
