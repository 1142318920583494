//! Nearest-neighbour intent classification

use super::tfidf::TfidfIndex;
use super::traits::IntentClassifier;
use std::sync::Arc;

/// Label returned when no labelled utterance shares a term with the input
pub const UNKNOWN_INTENT: &str = "unknown";

/// Labels text with the intent of its most similar labelled utterance
pub struct NearestIntentClassifier {
    index: Arc<TfidfIndex>,
    labels: Vec<Option<String>>,
}

impl NearestIntentClassifier {
    /// `labels[i]` is the intent of document `i` of `index`, if annotated
    pub fn new(index: Arc<TfidfIndex>, labels: Vec<Option<String>>) -> Self {
        Self { index, labels }
    }

    /// Distinct intent labels known to the classifier
    pub fn intents(&self) -> Vec<&str> {
        let mut intents: Vec<&str> = self.labels.iter().flatten().map(String::as_str).collect();
        intents.sort_unstable();
        intents.dedup();
        intents
    }
}

impl IntentClassifier for NearestIntentClassifier {
    fn classify(&self, text: &str) -> String {
        let mut best: Option<(&str, f64)> = None;
        for (label, score) in self.labels.iter().zip(self.index.similarities(text)) {
            let Some(label) = label else { continue };
            if score <= 0.0 {
                continue;
            }
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((label.as_str(), score));
            }
        }

        best.map(|(label, _)| label.to_string())
            .unwrap_or_else(|| UNKNOWN_INTENT.to_string())
    }
}
