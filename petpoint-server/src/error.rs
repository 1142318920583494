use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Failures surfaced by the HTTP handlers as `{"error": ...}`
#[derive(Debug)]
pub enum ApiError {
    /// The request body is not usable
    InvalidRequest,
    /// A collaborator needed for the request is not loaded
    Configuration(String),
    /// Anything else
    Internal(String),
}

impl From<petpoint_core::Error> for ApiError {
    fn from(e: petpoint_core::Error) -> Self {
        match e {
            petpoint_core::Error::Model(msg) => ApiError::Configuration(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidRequest => (
                StatusCode::BAD_REQUEST,
                "Invalid request. 'text' and 'session_id' are required.",
            ),
            ApiError::Configuration(detail) => {
                tracing::error!("Collaborator not loaded: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server configuration error.")
            }
            ApiError::Internal(detail) => {
                tracing::error!("Error processing chat request: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
