use std::sync::Arc;

use crate::analysis::{AtsScorer, ContentOptimizer, KeywordAtsScorer, Vocabulary};
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Skill list, importance tiers and stop words, built once at start-up.
    pub vocabulary: Arc<Vocabulary>,
    /// Pluggable scorer. Default: KeywordAtsScorer.
    pub ats_scorer: Arc<dyn AtsScorer>,
    pub optimizer: Arc<ContentOptimizer>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let vocabulary = Arc::new(Vocabulary::default());
        AppState {
            config,
            ats_scorer: Arc::new(KeywordAtsScorer::new(vocabulary.clone())),
            vocabulary,
            optimizer: Arc::new(ContentOptimizer::default()),
        }
    }
}
