//! Theme classification against a fixed taxonomy.

mod classifier;
mod taxonomy;

pub use classifier::{
    Entities, ThemeAnalysis, ThemeClassifier, ThemeScore, ThemeWeights, WordCloudEntry,
    ANALYSIS_KEYWORDS, MAX_THEMES, WORD_CLOUD_SIZE,
};
pub use taxonomy::Theme;
