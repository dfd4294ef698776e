//! Apache Solr engine implementation

use super::traits::*;
use crate::config::OutgoingSettings;
use crate::error::EngineError;
use crate::network::HttpClient;
use crate::query::StructuredQuery;
use crate::search::{Highlighting, SearchEndpoint};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct ResponseHeader {
    #[serde(default)]
    status: i64,
    #[serde(rename = "QTime", default)]
    qtime: u64,
}

#[derive(Debug, Deserialize)]
struct SelectBody {
    #[serde(rename = "responseHeader")]
    header: ResponseHeader,
    response: DocList,
    #[serde(default)]
    highlighting: Highlighting,
}

#[derive(Debug, Deserialize)]
struct DocList {
    #[serde(rename = "numFound")]
    num_found: u64,
    #[serde(default)]
    start: u64,
    #[serde(default)]
    docs: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct PingBody {
    #[serde(rename = "responseHeader")]
    header: ResponseHeader,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    msg: Option<String>,
}

/// Client for a single Solr core
pub struct SolrClient {
    base_url: String,
    client: Option<HttpClient>,
}

impl SolrClient {
    pub fn new(base_url: impl Into<String>, client: HttpClient) -> Self {
        Self {
            base_url: base_url.into(),
            client: Some(client),
        }
    }

    fn client(&self) -> Result<&HttpClient, EngineError> {
        self.client
            .as_ref()
            .ok_or_else(|| EngineError::Client("client already released".to_string()))
    }

    /// Build the select request for a query
    pub fn select_request(&self, query: &StructuredQuery) -> EngineRequest {
        EngineRequest::get(format!("{}/select", self.base_url)).params(query.to_params())
    }

    /// Build the ping request
    pub fn ping_request(&self) -> EngineRequest {
        EngineRequest::get(format!("{}/admin/ping", self.base_url)).param("wt", "json")
    }

    /// Parse a select response into a result set
    pub fn parse_select(response: EngineResponse) -> Result<QueryResponse, EngineError> {
        check_http(&response)?;

        let body: SelectBody = response.json()?;
        if body.header.status != 0 {
            return Err(EngineError::Engine {
                status: body.header.status,
                message: "query reported a non-zero status".to_string(),
            });
        }

        Ok(QueryResponse {
            documents: body.response.docs,
            num_found: body.response.num_found,
            start: body.response.start,
            highlighting: body.highlighting,
        })
    }

    /// Parse a ping response
    pub fn parse_ping(response: EngineResponse) -> Result<PingResponse, EngineError> {
        check_http(&response)?;

        let body: PingBody = response.json()?;
        let healthy = body
            .status
            .as_deref()
            .map_or(true, |s| s.eq_ignore_ascii_case("OK"));

        if body.header.status != 0 || !healthy {
            return Err(EngineError::Engine {
                status: body.header.status,
                message: format!(
                    "ping status {}",
                    body.status.as_deref().unwrap_or("unknown")
                ),
            });
        }

        Ok(PingResponse {
            status: body.header.status,
            qtime: body.header.qtime,
        })
    }
}

/// Turn a non-2xx response into an error, keeping Solr's message if it sent one
fn check_http(response: &EngineResponse) -> Result<(), EngineError> {
    if response.is_success() {
        return Ok(());
    }

    let message = serde_json::from_str::<ErrorBody>(&response.text)
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| e.msg)
        .unwrap_or_else(|| format!("request to {} failed", response.url));

    Err(EngineError::Http {
        status: response.status,
        message,
    })
}

#[async_trait]
impl SearchEngine for SolrClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn ping(&self) -> Result<PingResponse, EngineError> {
        let response = self.client()?.execute(self.ping_request()).await?;
        Self::parse_ping(response)
    }

    async fn query(&self, query: &StructuredQuery) -> Result<QueryResponse, EngineError> {
        debug!(
            "Querying {} with q={} start={} rows={}",
            self.base_url, query.field_query, query.offset, query.limit
        );
        let response = self.client()?.execute(self.select_request(query)).await?;
        Self::parse_select(response)
    }

    async fn close(&mut self) -> Result<(), EngineError> {
        // Dropping the reqwest client closes its idle connections
        match self.client.take() {
            Some(_) => Ok(()),
            None => Err(EngineError::Release("client already released".to_string())),
        }
    }
}

/// Opens a fresh [`SolrClient`] per call
#[derive(Debug, Clone, Default)]
pub struct SolrConnector {
    settings: OutgoingSettings,
}

impl SolrConnector {
    pub fn new(settings: OutgoingSettings) -> Self {
        Self { settings }
    }
}

impl EngineConnector for SolrConnector {
    fn connect(&self, endpoint: &SearchEndpoint) -> Result<Box<dyn SearchEngine>, EngineError> {
        let client = HttpClient::with_settings(&self.settings)?;
        Ok(Box::new(SolrClient::new(endpoint.url(), client)))
    }
}
