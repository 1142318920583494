//! NLP collaborators behind the chat endpoint
//!
//! Each capability sits behind a trait so the HTTP layer can be exercised
//! with fakes. The default implementations are built from a JSON dataset of
//! utterances, responses and optional intent/entity annotations.

pub mod classifier;
pub mod dataset;
pub mod engine;
pub mod retriever;
pub mod tagger;
pub mod text;
pub mod tfidf;
pub mod traits;

pub use classifier::NearestIntentClassifier;
pub use dataset::{load_dataset, DatasetRecord};
pub use engine::{ChatReply, NlpEngine};
pub use retriever::TfidfRetriever;
pub use tagger::GazetteerTagger;
pub use text::{clean_text, tokenize};
pub use tfidf::TfidfIndex;
pub use traits::{Entity, EntityTagger, IntentClassifier, ResponseRetriever};
