use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};

use crate::domain::providers::ProviderError;

/// Request-level failures surfaced to HTTP callers.
///
/// Cache store failures never appear here: the lookup service recovers from
/// them locally and degrades to direct provider calls.
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed request parameters. Neither the store nor the
    /// provider is touched.
    Validation { message: String, details: Value },
    /// The provider succeeded but found nothing.
    NotFound { message: String, details: Value },
    /// An upstream provider call failed.
    Provider(ProviderError),
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        Self::Provider(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            AppError::Validation { message, details } => {
                (StatusCode::BAD_REQUEST, message, details)
            }
            AppError::NotFound { message, details } => (StatusCode::NOT_FOUND, message, details),
            AppError::Provider(err) => {
                tracing::error!("Provider error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    json!({ "message": err.to_string() }),
                )
            }
            AppError::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    json!({ "message": message }),
                )
            }
        };

        // Flat envelope: { "error": <message>, ...context }
        let mut body = Map::new();
        body.insert("error".to_string(), Value::String(message));
        if let Value::Object(extra) = details {
            body.extend(extra);
        }

        (status, Json(Value::Object(body))).into_response()
    }
}
