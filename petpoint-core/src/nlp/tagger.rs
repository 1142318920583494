//! Lexicon-based entity tagging

use super::dataset::DatasetRecord;
use super::text::{clean_text, tokenize};
use super::traits::{Entity, EntityTagger};
use std::collections::HashMap;

/// Label of tokens outside any entity
pub const OUTSIDE: &str = "O";

/// Tags tokens that match known entity values, longest phrase first.
///
/// Labels follow the BIO scheme (`B-TYPE`, `I-TYPE`, `O`); every token that is
/// not `O` becomes one [`Entity`].
#[derive(Debug, Clone, Default)]
pub struct GazetteerTagger {
    /// phrase tokens -> entity type
    phrases: HashMap<Vec<String>, String>,
    longest: usize,
}

impl GazetteerTagger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the lexicon from dataset annotations; the first type seen for a
    /// value wins.
    pub fn from_records(records: &[DatasetRecord]) -> Self {
        let mut tagger = Self::new();
        for entity in records.iter().flat_map(|r| &r.entities) {
            tagger.insert(&entity.value, &entity.entity);
        }
        tagger
    }

    /// Register a value under an entity type. Returns false if the value
    /// cleans to nothing or is already known.
    pub fn insert(&mut self, value: &str, entity_type: &str) -> bool {
        let cleaned = clean_text(value);
        let tokens: Vec<String> = tokenize(&cleaned).into_iter().map(str::to_string).collect();
        if tokens.is_empty() || self.phrases.contains_key(&tokens) {
            return false;
        }
        self.longest = self.longest.max(tokens.len());
        self.phrases.insert(tokens, entity_type.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// BIO label for every whitespace token of `text`
    pub fn labels<'a>(&self, text: &'a str) -> Vec<(&'a str, String)> {
        let tokens = tokenize(text);
        let mut labels = Vec::with_capacity(tokens.len());
        let mut i = 0;

        while i < tokens.len() {
            match self.longest_match(&tokens[i..]) {
                Some((len, entity_type)) => {
                    for (offset, token) in tokens[i..i + len].iter().enumerate() {
                        let prefix = if offset == 0 { "B" } else { "I" };
                        labels.push((*token, format!("{}-{}", prefix, entity_type)));
                    }
                    i += len;
                }
                None => {
                    labels.push((tokens[i], OUTSIDE.to_string()));
                    i += 1;
                }
            }
        }

        labels
    }

    fn longest_match(&self, tokens: &[&str]) -> Option<(usize, &str)> {
        let max = self.longest.min(tokens.len());
        (1..=max).rev().find_map(|len| {
            let key: Vec<String> = tokens[..len].iter().map(|t| t.to_string()).collect();
            self.phrases.get(&key).map(|t| (len, t.as_str()))
        })
    }
}

impl EntityTagger for GazetteerTagger {
    fn tag(&self, text: &str) -> Vec<Entity> {
        self.labels(text)
            .into_iter()
            .filter(|(_, label)| label != OUTSIDE)
            .filter_map(|(token, label)| {
                label
                    .split_once('-')
                    .map(|(_, entity_type)| Entity::new(entity_type, token))
            })
            .collect()
    }
}
