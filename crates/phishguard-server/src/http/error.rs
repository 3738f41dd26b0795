use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use phishguard::PhishError;
use serde_json::json;

/// Failures surfaced by the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing URL parameter")]
    MissingUrl,

    #[error("Feature importance data not available")]
    ImportanceUnavailable,

    #[error("{0}")]
    Prediction(#[from] PhishError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::MissingUrl => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": self.to_string(),
                    "example": { "url": "https://example.com" },
                }),
            ),
            ApiError::ImportanceUnavailable => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": self.to_string(),
                    "message": "Train the model first to generate feature importance data",
                }),
            ),
            ApiError::Prediction(err) => {
                tracing::error!(error = %err, "prediction failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": err.to_string(),
                        "message": "An error occurred during prediction",
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
