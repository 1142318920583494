//! Similarity-based response lookup

use super::tfidf::TfidfIndex;
use super::traits::ResponseRetriever;
use std::sync::Arc;
use tracing::debug;

/// Returns the response of the most similar dataset utterance, or a fixed
/// fallback when nothing scores at least the threshold.
pub struct TfidfRetriever {
    index: Arc<TfidfIndex>,
    responses: Vec<String>,
    threshold: f64,
    fallback: String,
}

impl TfidfRetriever {
    /// `responses[i]` must belong to document `i` of `index`
    pub fn new(
        index: Arc<TfidfIndex>,
        responses: Vec<String>,
        threshold: f64,
        fallback: impl Into<String>,
    ) -> Self {
        Self {
            index,
            responses,
            threshold,
            fallback: fallback.into(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl ResponseRetriever for TfidfRetriever {
    fn similarity_lookup(&self, text: &str) -> String {
        let Some((idx, score)) = self.index.best_match(text) else {
            return self.fallback.clone();
        };
        debug!(idx, score, "Most similar utterance");

        if score < self.threshold {
            return self.fallback.clone();
        }
        self.responses
            .get(idx)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }
}
