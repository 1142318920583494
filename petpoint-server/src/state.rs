use petpoint_core::nlp::NlpEngine;
use petpoint_core::session::SessionStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared context handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub engine: Arc<NlpEngine>,
}

impl AppState {
    pub fn new(sessions: Arc<SessionStore>, engine: Arc<NlpEngine>) -> Self {
        Self { sessions, engine }
    }
}

/// Body of `POST /chat/`. Fields are optional so a missing one can be
/// reported as a 400 instead of an extractor rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    pub text: Option<String>,
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
