//! Similarity ranking and the recommendation pipeline.
//!
//! [`SimilarityRanker`] holds the pure scoring; [`Recommender`] adds the
//! external catalog lookups and the local corpus fallback on top of it.

mod corpus;
mod explanation;
mod graph;
mod models;
mod pipeline;
mod preferences;
mod ranker;
mod similarity;

pub use corpus::{sample_songs, SongCorpus};
pub use explanation::{explain, FALLBACK_EXPLANATION};
pub use graph::{
    build_knowledge_graph, GraphNode, GraphRelationship, KnowledgeGraph, NodeKind, RelationKind,
};
pub use models::{
    CandidateSong, RankedRecommendation, RecommendationSource, Recommendations,
    SimilarityBreakdown, SongSource,
};
pub use pipeline::{Recommender, DEFAULT_LOOKUP_TIMEOUT};
pub use preferences::{InMemoryPreferenceStore, PreferenceStore, UserPreferences};
pub use ranker::{LyricProfile, RecommendError, SimilarityRanker};
pub use similarity::{
    content_jaccard, keyword_similarity, sentiment_similarity, tfidf_cosine, theme_similarity,
    ContentSimilarity, FusionWeights, MAX_TFIDF_TERMS, QUERY_KEYWORDS,
};
