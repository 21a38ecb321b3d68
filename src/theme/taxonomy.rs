use serde::{Serialize, Serializer};

/// Fixed theme taxonomy, in tie-breaking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Theme {
    Love,
    Inspiration,
    Nostalgia,
    Friendship,
    Solitude,
    Freedom,
    Sorrow,
    Happiness,
    Nature,
    City,
    Night,
    Travel,
    Growth,
    Farewell,
}

impl Theme {
    pub const ALL: [Theme; 14] = [
        Theme::Love,
        Theme::Inspiration,
        Theme::Nostalgia,
        Theme::Friendship,
        Theme::Solitude,
        Theme::Freedom,
        Theme::Sorrow,
        Theme::Happiness,
        Theme::Nature,
        Theme::City,
        Theme::Night,
        Theme::Travel,
        Theme::Growth,
        Theme::Farewell,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Love => "爱情",
            Theme::Inspiration => "励志",
            Theme::Nostalgia => "怀旧",
            Theme::Friendship => "友情",
            Theme::Solitude => "孤独",
            Theme::Freedom => "自由",
            Theme::Sorrow => "悲伤",
            Theme::Happiness => "快乐",
            Theme::Nature => "自然",
            Theme::City => "城市",
            Theme::Night => "夜晚",
            Theme::Travel => "旅行",
            Theme::Growth => "成长",
            Theme::Farewell => "离别",
        }
    }

    pub fn from_name(name: &str) -> Option<Theme> {
        Theme::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Keywords matched against lyric tokens when scoring this theme.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Theme::Love => &["爱", "恋", "情", "心", "思念", "拥抱", "吻", "温柔", "浪漫", "甜蜜", "恋人", "情侣", "相爱", "深情"],
            Theme::Inspiration => &["梦想", "坚持", "努力", "奋斗", "成功", "希望", "未来", "勇敢", "坚强", "拼搏", "追求", "目标"],
            Theme::Nostalgia => &["回忆", "过去", "曾经", "青春", "时光", "岁月", "怀念", "往事", "从前", "旧时", "记忆"],
            Theme::Friendship => &["朋友", "兄弟", "友谊", "陪伴", "一起", "共同", "支持", "伙伴", "知己", "同伴"],
            Theme::Solitude => &["孤独", "寂寞", "独自", "一个人", "空虚", "失落", "孤单", "孤寂", "落寞"],
            Theme::Freedom => &["自由", "飞翔", "天空", "风", "无拘无束", "释放", "解脱", "自在"],
            Theme::Sorrow => &["哭", "泪", "痛", "伤", "失去", "离别", "痛苦", "难过", "伤心", "哀伤"],
            Theme::Happiness => &["笑", "开心", "快乐", "幸福", "喜悦", "欢乐", "高兴", "愉快", "欣喜"],
            Theme::Nature => &["山", "海", "风", "雨", "云", "月", "星", "花", "树", "鸟", "自然", "风景"],
            Theme::City => &["城市", "街道", "霓虹", "灯火", "高楼", "都市", "繁华", "喧嚣"],
            Theme::Night => &["夜", "夜晚", "深夜", "星空", "月亮", "黑暗", "寂静", "宁静"],
            Theme::Travel => &["旅行", "远方", "旅程", "出发", "到达", "风景", "探索", "冒险"],
            Theme::Growth => &["成长", "长大", "经历", "变化", "成熟", "蜕变", "进步"],
            Theme::Farewell => &["离别", "分别", "再见", "离开", "远去", "告别", "分离"],
        }
    }

    /// The shorter core word list, used to pick out emotion words.
    pub fn core_keywords(self) -> &'static [&'static str] {
        match self {
            Theme::Love => &["爱", "恋", "情", "心", "思念", "拥抱", "吻", "温柔", "浪漫", "甜蜜"],
            Theme::Inspiration => &["梦想", "坚持", "努力", "奋斗", "成功", "希望", "未来", "勇敢", "坚强"],
            Theme::Nostalgia => &["回忆", "过去", "曾经", "青春", "时光", "岁月", "怀念", "往事"],
            Theme::Friendship => &["朋友", "兄弟", "友谊", "陪伴", "一起", "共同", "支持"],
            Theme::Solitude => &["孤独", "寂寞", "独自", "一个人", "空虚", "失落"],
            Theme::Freedom => &["自由", "飞翔", "天空", "风", "无拘无束", "释放"],
            Theme::Sorrow => &["哭", "泪", "痛", "伤", "失去", "离别", "痛苦"],
            Theme::Happiness => &["笑", "开心", "快乐", "幸福", "喜悦", "欢乐"],
            _ => &[],
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Theme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_name(theme.name()), Some(theme));
        }
        assert_eq!(Theme::from_name("摇滚"), None);
    }

    #[test]
    fn test_core_keywords_are_subset() {
        for theme in Theme::ALL {
            for word in theme.core_keywords() {
                assert!(theme.keywords().contains(word), "{word} missing from {theme}");
            }
        }
    }
}
