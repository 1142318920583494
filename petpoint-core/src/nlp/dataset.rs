//! Conversation dataset loading

use super::traits::Entity;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One row of the dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetRecord {
    /// Example user utterance
    pub utterances: String,
    /// Response returned when a query matches this utterance
    pub responses: String,
    /// Intent label of the utterance
    #[serde(default)]
    pub intent: Option<String>,
    /// Entities annotated in the utterance
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl DatasetRecord {
    pub fn new(utterances: impl Into<String>, responses: impl Into<String>) -> Self {
        Self {
            utterances: utterances.into(),
            responses: responses.into(),
            intent: None,
            entities: Vec::new(),
        }
    }

    pub fn with_intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = Some(intent.into());
        self
    }

    pub fn with_entity(mut self, entity: impl Into<String>, value: impl Into<String>) -> Self {
        self.entities.push(Entity::new(entity, value));
        self
    }
}

/// Load the dataset from a JSON array file
pub fn load_dataset<P: AsRef<Path>>(path: P) -> crate::Result<Vec<DatasetRecord>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let records: Vec<DatasetRecord> = serde_json::from_str(&content)?;
    Ok(records)
}
