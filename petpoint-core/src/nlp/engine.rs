//! Bundles the collaborators into one request-level call

use super::classifier::NearestIntentClassifier;
use super::dataset::{load_dataset, DatasetRecord};
use super::retriever::TfidfRetriever;
use super::tagger::GazetteerTagger;
use super::text::clean_text;
use super::tfidf::TfidfIndex;
use super::traits::{Entity, EntityTagger, IntentClassifier, ResponseRetriever};
use crate::config::NlpConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Everything the chat endpoint returns for one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub intent: String,
    pub entities: Vec<Entity>,
    pub response: String,
}

/// The three collaborators behind the chat endpoint.
///
/// A collaborator may be missing when its data failed to load at startup;
/// [`process`](Self::process) then fails with [`crate::Error::Model`] instead
/// of answering.
pub struct NlpEngine {
    classifier: Option<Box<dyn IntentClassifier>>,
    tagger: Option<Box<dyn EntityTagger>>,
    retriever: Option<Box<dyn ResponseRetriever>>,
}

impl NlpEngine {
    pub fn new(
        classifier: Box<dyn IntentClassifier>,
        tagger: Box<dyn EntityTagger>,
        retriever: Box<dyn ResponseRetriever>,
    ) -> Self {
        Self {
            classifier: Some(classifier),
            tagger: Some(tagger),
            retriever: Some(retriever),
        }
    }

    /// An engine with nothing loaded; every request fails
    pub fn unloaded() -> Self {
        Self {
            classifier: None,
            tagger: None,
            retriever: None,
        }
    }

    /// Build the default collaborators from dataset records
    pub fn from_records(records: &[DatasetRecord], config: &NlpConfig) -> Self {
        let cleaned: Vec<String> = records.iter().map(|r| clean_text(&r.utterances)).collect();
        let index = Arc::new(TfidfIndex::build(&cleaned));

        let labels = records.iter().map(|r| r.intent.clone()).collect();
        let responses = records.iter().map(|r| r.responses.clone()).collect();

        let classifier = NearestIntentClassifier::new(Arc::clone(&index), labels);
        let tagger = GazetteerTagger::from_records(records);
        let retriever = TfidfRetriever::new(
            index,
            responses,
            config.similarity_threshold,
            config.fallback_response.clone(),
        );

        info!(
            utterances = records.len(),
            intents = classifier.intents().len(),
            entity_values = tagger.len(),
            "NLP collaborators built"
        );

        Self::new(Box::new(classifier), Box::new(tagger), Box::new(retriever))
    }

    /// Load the dataset named by the config and build the collaborators.
    ///
    /// A dataset that cannot be read leaves the engine unloaded so the
    /// service still starts and reports the problem per request.
    pub fn from_config(config: &NlpConfig) -> Self {
        match load_dataset(&config.dataset_path) {
            Ok(records) => {
                if records.is_empty() {
                    warn!(path = %config.dataset_path, "Dataset is empty");
                }
                Self::from_records(&records, config)
            }
            Err(e) => {
                error!(path = %config.dataset_path, "Failed to load dataset: {}", e);
                Self::unloaded()
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.classifier.is_some() && self.tagger.is_some() && self.retriever.is_some()
    }

    /// Clean `text` once and run every collaborator on it
    pub fn process(&self, text: &str) -> crate::Result<ChatReply> {
        let cleaned = clean_text(text);
        debug!(cleaned = %cleaned, "Cleaned text");

        let classifier = self
            .classifier
            .as_ref()
            .ok_or_else(|| crate::Error::Model("intent classifier is not loaded".to_string()))?;
        let intent = classifier.classify(&cleaned);
        debug!(intent = %intent, "Predicted intent");

        let tagger = self
            .tagger
            .as_ref()
            .ok_or_else(|| crate::Error::Model("entity tagger is not loaded".to_string()))?;
        let entities = tagger.tag(&cleaned);
        debug!(entities = ?entities, "Predicted entities");

        let retriever = self
            .retriever
            .as_ref()
            .ok_or_else(|| crate::Error::Model("response index is not loaded".to_string()))?;
        let response = retriever.similarity_lookup(&cleaned);

        Ok(ChatReply {
            intent,
            entities,
            response,
        })
    }
}
