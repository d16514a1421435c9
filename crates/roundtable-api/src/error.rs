// API error responses
//
// Every internal error is caught at the handler boundary and converted to a
// structured `{"error": ...}` JSON body; nothing crashes the serving pool.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Error taxonomy for the HTTP surface
#[derive(Debug)]
pub enum ApiError {
    /// Requested model matches neither the registry nor the custom store
    ModelNotFound,
    /// Request is well-formed but unusable (e.g. too few valid agents)
    Validation(String),
    /// Anything that went wrong past the validation boundary
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::ModelNotFound => {
                (StatusCode::NOT_FOUND, "Model not found".to_string())
            }
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
