//! Common test infrastructure
//!
//! Deterministic collaborators and scripted catalogs for end-to-end tests.
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{external_recommender, ScriptedCatalog, PLATFORM};
//! use std::sync::Arc;
//!
//! #[tokio::test]
//! async fn test_external_results() {
//!     let catalog = Arc::new(ScriptedCatalog::new(PLATFORM));
//!     let recommender = external_recommender(catalog.clone(), vec![]);
//!     let result = recommender.recommend("梦想 坚持", 3, None).await.unwrap();
//!     assert!(!catalog.searches().is_empty());
//! }
//! ```

mod catalogs;
mod constants;
mod fakes;

// Public API - this is what tests import
#[allow(unused_imports)]
pub use catalogs::{FailingCatalog, ScriptedCatalog, TimeoutCatalog};
#[allow(unused_imports)]
pub use constants::*;
#[allow(unused_imports)]
pub use fakes::{
    analyzer, external_recommender, local_recommender, ranker, FixedPolarity, MapPhonetics,
};
