// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Station ID / PASSWORD missing or wrong.
    #[error("Invalid station credentials")]
    InvalidCredentials,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("MQTT error: {0}")]
    Mqtt(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<rumqttc::ClientError> for AppError {
    fn from(err: rumqttc::ClientError) -> Self {
        match err {
            rumqttc::ClientError::TryRequest(_) => {
                AppError::Mqtt("request queue full or event loop stopped".to_string())
            }
            other => AppError::Mqtt(other.to_string()),
        }
    }
}

impl From<rumqttc::ConnectionError> for AppError {
    fn from(err: rumqttc::ConnectionError) -> Self {
        AppError::Mqtt(err.to_string())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::InvalidCredentials => {
                (StatusCode::BAD_REQUEST, "invalid_credentials", None)
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Mqtt(msg) => {
                tracing::error!(error = %msg, "MQTT error");
                (StatusCode::BAD_GATEWAY, "mqtt_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
