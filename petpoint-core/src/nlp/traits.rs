//! Collaborator contracts consumed by the chat endpoint

use serde::{Deserialize, Serialize};

/// A tagged token: entity type plus the surface value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub entity: String,
    pub value: String,
}

impl Entity {
    pub fn new(entity: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            value: value.into(),
        }
    }
}

/// Predicts the intent label of cleaned text
pub trait IntentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> String;
}

/// Extracts named entities from cleaned text
pub trait EntityTagger: Send + Sync {
    fn tag(&self, text: &str) -> Vec<Entity>;
}

/// Picks a canned response for cleaned text
pub trait ResponseRetriever: Send + Sync {
    fn similarity_lookup(&self, text: &str) -> String;
}
