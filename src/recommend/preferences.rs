use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock};

use super::models::CandidateSong;
use super::similarity::FusionWeights;

/// Themes and styles a user likes; matching candidates get boosted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub preferred_themes: BTreeSet<String>,
    #[serde(default)]
    pub preferred_styles: BTreeSet<String>,
}

impl UserPreferences {
    pub fn is_empty(&self) -> bool {
        self.preferred_themes.is_empty() && self.preferred_styles.is_empty()
    }

    /// Sum of the boosts for the candidate's theme and style.
    pub fn boost_for(&self, song: &CandidateSong, weights: &FusionWeights) -> f64 {
        let mut boost = 0.0;
        if song
            .theme
            .as_ref()
            .is_some_and(|t| self.preferred_themes.contains(t))
        {
            boost += weights.theme_boost;
        }
        if song
            .style
            .as_ref()
            .is_some_and(|s| self.preferred_styles.contains(s))
        {
            boost += weights.style_boost;
        }
        boost
    }
}

/// Lookup of stored preferences by user id.
pub trait PreferenceStore: Send + Sync {
    fn preferences(&self, user_id: &str) -> Option<UserPreferences>;
}

#[derive(Default)]
pub struct InMemoryPreferenceStore {
    entries: RwLock<HashMap<String, UserPreferences>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, user_id: impl Into<String>, preferences: UserPreferences) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user_id.into(), preferences);
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn preferences(&self, user_id: &str) -> Option<UserPreferences> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id)
            .cloned()
    }
}
