//! Unified error types for the article feed API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic errors
//! - `FirestoreError`: Firestore REST client errors
//! - `ConfigError`: Configuration and credential loading errors
//! - `FeedError`: RSS serialization errors
//! - `AppError`: Application layer errors (wraps the others for HTTP responses)

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Firestore REST client errors
#[derive(Debug, Error)]
pub enum FirestoreError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Unauthorized - access token rejected")]
    Unauthorized,

    #[error("Token exchange failed: {0}")]
    Token(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Errors raised while reading configuration or credentials
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Credentials file not found: {}", .0.display())]
    CredentialsFileNotFound(PathBuf),

    #[error("Environment variable {0} must be set")]
    MissingVariable(&'static str),

    #[error("Failed to read credentials: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse credentials: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid credentials: {0}")]
    Invalid(String),
}

/// RSS document generation errors
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("XML write error: {0}")]
    Xml(String),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Database not initialized. Check server logs.")]
    Unavailable,

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Store and serialization failures echo their text to the caller.
        let (status, error, details) = match &self {
            AppError::Domain(DomainError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(msg.clone()),
            ),
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    Some(msg.clone()),
                )
            }
            AppError::Feed(e) => {
                tracing::error!("Feed error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    Some(e.to_string()),
                )
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized", None),
            AppError::InvalidApiKey => (StatusCode::UNAUTHORIZED, "Invalid API key", None),
            AppError::Unavailable => {
                tracing::error!("Request received but the article store is not initialized");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database not initialized. Check server logs.",
                    None,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    Some(msg.clone()),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}

impl From<FirestoreError> for DomainError {
    fn from(e: FirestoreError) -> Self {
        DomainError::Database(e.to_string())
    }
}
