#![allow(dead_code)]

use std::time::Duration;

pub const PLATFORM: &str = "scripted";

/// Per-lookup timeout used by recommenders built for tests.
pub const LOOKUP_TIMEOUT: Duration = Duration::from_millis(200);

/// Pre-segmented query: keywords 梦想, 坚持, 远方, 希望; themes 励志, 旅行.
pub const DREAM_QUERY: &str = "梦想 坚持 远方\n梦想 希望";

pub const DREAM_LYRICS: &str = "梦想 坚持 远方";
pub const HOPE_LYRICS: &str = "梦想 希望";
pub const CITY_LYRICS: &str = "城市 霓虹";
