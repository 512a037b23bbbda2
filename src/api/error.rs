//! Error types for backend calls.
//!
//! Every request failure is classified once here so screens and the CLI
//! can show a single message string.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Could not reach the backend or the request timed out.
    #[error("Connection to {url} failed: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Missing or expired session token.
    #[error("Not authorized: {message}")]
    Unauthorized { message: String },

    /// Backend answered with a non-success status.
    #[error("Backend error {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not have the expected shape.
    #[error("Unexpected response from {url}: {message}")]
    Decode { url: String, message: String },

    /// Base URL and path did not form a valid URL.
    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),
}

impl ApiError {
    /// Short text suitable for a notification.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Connection { .. } => "Backend is unreachable".to_string(),
            ApiError::Unauthorized { .. } => "Session expired, please log in again".to_string(),
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Decode { .. } => "Backend sent an unexpected response".to_string(),
            ApiError::InvalidUrl(_) => "Backend URL is misconfigured".to_string(),
        }
    }

    /// HTTP status when the backend answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => StatusCode::from_u16(*status).ok(),
            ApiError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            _ => None,
        }
    }

    /// Stable error kind, logged next to the message.
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Connection { .. } => "connection_error",
            ApiError::Unauthorized { .. } => "unauthorized",
            ApiError::Status { .. } => "backend_error",
            ApiError::Decode { .. } => "decode_error",
            ApiError::InvalidUrl(_) => "invalid_url",
        }
    }
}
