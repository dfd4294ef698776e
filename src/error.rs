//! Error types for the gateway
//!
//! `EngineError` classifies failures talking to Solr. `GatewayError` is what
//! request handlers return; it maps to an HTTP status and a sanitized body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Failure while talking to the search engine
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("failed to reach search engine: {0}")]
    Connectivity(String),

    #[error("search engine request timed out: {0}")]
    Timeout(String),

    #[error("search engine returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("search engine reported status {status}: {message}")]
    Engine { status: i64, message: String },

    #[error("malformed search engine response: {0}")]
    Decode(String),

    #[error("failed to build search engine client: {0}")]
    Client(String),

    #[error("failed to release search engine client: {0}")]
    Release(String),
}

impl EngineError {
    /// Short description that is safe to return to callers
    pub fn summary(&self) -> String {
        match self {
            EngineError::Connectivity(_) => "search engine unreachable".to_string(),
            EngineError::Timeout(_) => "search engine timed out".to_string(),
            EngineError::Http { status, .. } => format!("search engine returned HTTP {}", status),
            EngineError::Engine { status, .. } => {
                format!("search engine reported status {}", status)
            }
            EngineError::Decode(_) => "malformed response from search engine".to_string(),
            EngineError::Client(_) => "search engine client unavailable".to_string(),
            EngineError::Release(_) => "failed to release search engine client".to_string(),
        }
    }
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EngineError::Timeout(err.to_string())
        } else if err.is_decode() {
            EngineError::Decode(err.to_string())
        } else if err.is_builder() {
            EngineError::Client(err.to_string())
        } else if let Some(status) = err.status() {
            EngineError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            EngineError::Connectivity(err.to_string())
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Decode(err.to_string())
    }
}

/// Main error type for request handling
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Search query failed: {0}")]
    QueryExecution(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    /// Convert error to appropriate HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            GatewayError::QueryExecution(_) | GatewayError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message returned to the caller; server-side detail stays in the logs
    pub fn public_message(&self) -> String {
        match self {
            GatewayError::InvalidArgument(_) => self.to_string(),
            GatewayError::QueryExecution(_) => "Search request failed".to_string(),
            GatewayError::Config(_) => "Gateway is misconfigured".to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        let body = Json(json!({
            "status": "error",
            "message": self.public_message(),
            "statusCode": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
