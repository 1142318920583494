use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use petpoint_core::nlp::ChatReply;
use petpoint_core::session::Exchange;

use crate::error::ApiError;
use crate::state::{AppState, ChatRequest, HealthResponse};

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Chatbot API is running.".to_string(),
    })
}

pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(request) = payload.map_err(|e| {
        tracing::error!("Invalid request body: {}", e);
        ApiError::InvalidRequest
    })?;

    let (text, session_id) = match (request.text, request.session_id) {
        (Some(text), Some(session_id)) if !session_id.is_empty() => (text, session_id),
        (text, session_id) => {
            tracing::error!(?text, ?session_id, "Invalid request data");
            return Err(ApiError::InvalidRequest);
        }
    };

    tracing::info!(%session_id, %text, "Received chat request");

    let reply = state.engine.process(&text)?;

    state
        .sessions
        .append(&session_id, Exchange::new(text, reply.response.clone()));

    tracing::info!(
        intent = %reply.intent,
        entities = ?reply.entities,
        response = %reply.response,
        "Sending chat response"
    );

    Ok(Json(reply))
}

pub async fn reset_session_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<serde_json::Value> {
    tracing::info!("Received reset request for session {}", session_id);
    state.sessions.reset(&session_id);
    Json(serde_json::json!({ "status": "ok" }))
}
