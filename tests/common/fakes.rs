#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use lyric_recommender::analysis::LyricAnalyzer;
use lyric_recommender::catalog::ExternalCatalog;
use lyric_recommender::recommend::{CandidateSong, Recommender, SimilarityRanker, SongCorpus};
use lyric_recommender::rhyme::RhymeAnalyzer;
use lyric_recommender::sentiment::{LexiconPolarity, SentimentScorer};
use lyric_recommender::text::{PhoneticLookup, PolarityEstimator, Tokenizer, WhitespaceTokenizer};
use lyric_recommender::theme::ThemeClassifier;

use super::constants::LOOKUP_TIMEOUT;

/// Polarity estimator returning the same value for every text.
pub struct FixedPolarity(pub f64);

impl PolarityEstimator for FixedPolarity {
    fn score(&self, _text: &str) -> f64 {
        self.0
    }
}

/// Phonetic lookup backed by a fixed character table.
#[derive(Default)]
pub struct MapPhonetics {
    finals: HashMap<char, String>,
}

impl MapPhonetics {
    pub fn new(entries: &[(char, &str)]) -> Self {
        Self {
            finals: entries
                .iter()
                .map(|(c, f)| (*c, f.to_string()))
                .collect(),
        }
    }
}

impl PhoneticLookup for MapPhonetics {
    fn final_sound(&self, ch: char) -> Option<String> {
        self.finals.get(&ch).cloned()
    }
}

fn tokenizer() -> Arc<dyn Tokenizer> {
    Arc::new(WhitespaceTokenizer)
}

/// Ranker over whitespace-segmented text with lexicon polarity.
pub fn ranker() -> SimilarityRanker {
    let tokenizer = tokenizer();
    let polarity = Arc::new(LexiconPolarity::new(tokenizer.clone()));
    SimilarityRanker::new(
        tokenizer.clone(),
        SentimentScorer::new(tokenizer.clone(), polarity),
        ThemeClassifier::new(tokenizer),
    )
}

/// Recommender over the given corpus without an external catalog.
pub fn local_recommender(corpus: Vec<CandidateSong>) -> Recommender {
    Recommender::new(ranker(), Arc::new(SongCorpus::from_songs(corpus)))
        .with_lookup_timeout(LOOKUP_TIMEOUT)
}

pub fn external_recommender(
    catalog: Arc<dyn ExternalCatalog>,
    corpus: Vec<CandidateSong>,
) -> Recommender {
    local_recommender(corpus).with_catalog(catalog)
}

/// Analyzer with a fixed polarity and a scripted phonetic table.
pub fn analyzer(polarity: f64, phonetics: MapPhonetics) -> LyricAnalyzer {
    let tokenizer = tokenizer();
    LyricAnalyzer::new(
        SentimentScorer::new(tokenizer.clone(), Arc::new(FixedPolarity(polarity))),
        ThemeClassifier::new(tokenizer),
        RhymeAnalyzer::new(Arc::new(phonetics)),
    )
}
