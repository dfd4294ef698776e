//! Engine traits and types

use crate::error::EngineError;
use crate::query::StructuredQuery;
use crate::search::{Highlighting, SearchEndpoint};
use async_trait::async_trait;
use tracing::warn;

/// HTTP request to be made against the engine
#[derive(Debug, Clone)]
pub struct EngineRequest {
    /// URL to request
    pub url: String,
    /// Query parameters, sent in order
    pub params: Vec<(String, String)>,
}

impl EngineRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: Vec::new(),
        }
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Add several query parameters
    pub fn params(mut self, params: impl IntoIterator<Item = (String, String)>) -> Self {
        self.params.extend(params);
        self
    }
}

/// HTTP response from an engine request
#[derive(Debug)]
pub struct EngineResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl EngineResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, EngineError> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Result of a successful ping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PingResponse {
    /// Status reported in the engine's response header (0 on success)
    pub status: i64,
    /// Query time reported by the engine, in milliseconds
    pub qtime: u64,
}

/// Raw result set of a query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResponse {
    pub documents: Vec<serde_json::Value>,
    pub num_found: u64,
    pub start: u64,
    pub highlighting: Highlighting,
}

/// A transient connection to the search engine
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// URL of the core this client talks to
    fn base_url(&self) -> &str;

    /// Lightweight health check
    async fn ping(&self) -> Result<PingResponse, EngineError>;

    /// Execute a structured query
    async fn query(&self, query: &StructuredQuery) -> Result<QueryResponse, EngineError>;

    /// Release the underlying connection; the client is unusable afterwards
    async fn close(&mut self) -> Result<(), EngineError>;
}

/// Opens transient engine clients for an endpoint
pub trait EngineConnector: Send + Sync {
    fn connect(&self, endpoint: &SearchEndpoint) -> Result<Box<dyn SearchEngine>, EngineError>;
}

/// Close a client, logging and discarding any failure
pub async fn release(mut engine: Box<dyn SearchEngine>) {
    if let Err(e) = engine.close().await {
        warn!("Ignoring error while closing client for {}: {}", engine.base_url(), e);
    }
}
