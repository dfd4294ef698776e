//! Search request, result and envelope models

use crate::engine::{PingResponse, QueryResponse};
use crate::error::{EngineError, GatewayError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// Page used when the caller does not ask for one
pub const DEFAULT_PAGE: u32 = 0;

/// Page size used when the caller does not ask for one
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest `start` Solr accepts; it parses the offset as a 32-bit int
pub const MAX_OFFSET: u64 = i32::MAX as u64;

/// Highlight fragments: document id -> field -> fragments
pub type Highlighting = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// The Solr core every request is sent to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEndpoint {
    host: Url,
    collection: String,
    field: String,
}

impl SearchEndpoint {
    pub fn new(host: Url, collection: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            host,
            collection: collection.into(),
            field: field.into(),
        }
    }

    /// `host + "/" + collection`
    pub fn url(&self) -> String {
        format!(
            "{}/{}",
            self.host.as_str().trim_end_matches('/'),
            self.collection
        )
    }

    /// Field targeted by matching and highlighting
    pub fn field(&self) -> &str {
        &self.field
    }
}

/// A validated search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    page: u32,
    page_size: u32,
}

impl SearchRequest {
    /// Validate raw parameters, applying defaults for omitted values
    pub fn new(
        query: impl Into<String>,
        page: Option<i64>,
        page_size: Option<i64>,
        max_page_size: u32,
    ) -> Result<Self, GatewayError> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(GatewayError::InvalidArgument(
                "query must not be empty".to_string(),
            ));
        }

        let page = match page {
            None => DEFAULT_PAGE,
            Some(p) => u32::try_from(p).map_err(|_| {
                GatewayError::InvalidArgument(format!(
                    "page must be between 0 and {}, got {}",
                    u32::MAX,
                    p
                ))
            })?,
        };

        let page_size = match page_size {
            None => DEFAULT_PAGE_SIZE,
            Some(s) if (1..=i64::from(max_page_size)).contains(&s) => s as u32,
            Some(s) => {
                return Err(GatewayError::InvalidArgument(format!(
                    "size must be between 1 and {}, got {}",
                    max_page_size, s
                )))
            }
        };

        let request = Self {
            query,
            page,
            page_size,
        };
        if request.offset() > MAX_OFFSET {
            return Err(GatewayError::InvalidArgument(format!(
                "page {} with size {} is past the last reachable document",
                page, page_size
            )));
        }

        Ok(request)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Index of the first document on this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.page_size)
    }
}

/// Documents returned for one request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    /// Documents in relevance order, passed through untouched
    pub documents: Vec<serde_json::Value>,
    /// Total number of matches in the collection
    pub total_found: u64,
    /// Offset the engine started from
    pub start: u64,
    pub highlighting: Highlighting,
}

impl From<QueryResponse> for SearchResult {
    fn from(response: QueryResponse) -> Self {
        Self {
            documents: response.documents,
            total_found: response.num_found,
            start: response.start,
            highlighting: response.highlighting,
        }
    }
}

/// JSON envelope for `/api/search`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<serde_json::Value>,
    pub num_found: u64,
    pub start: u64,
    pub page: u32,
    pub size: u32,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub highlighting: Highlighting,
}

impl SearchResponse {
    pub fn new(result: SearchResult, request: &SearchRequest) -> Self {
        Self {
            results: result.documents,
            num_found: result.total_found,
            start: result.start,
            page: request.page(),
            size: request.page_size(),
            highlighting: result.highlighting,
        }
    }
}

/// Outcome of a probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Success,
    Error,
}

/// JSON envelope for `/api/test-connection`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResult {
    pub status: ProbeStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<i64>,
    /// Query time reported by the engine, in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u64>,
    pub solr_url: String,
}

impl ProbeResult {
    pub fn success(solr_url: String, ping: PingResponse) -> Self {
        Self {
            status: ProbeStatus::Success,
            message: "Connected to Solr server".to_string(),
            status_code: Some(ping.status),
            response_time: Some(ping.qtime),
            solr_url,
        }
    }

    pub fn failure(solr_url: String, error: &EngineError) -> Self {
        Self {
            status: ProbeStatus::Error,
            message: format!("Failed to connect to Solr server: {}", error.summary()),
            status_code: None,
            response_time: None,
            solr_url,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ProbeStatus::Success
    }
}
