//! Query gateway: request -> structured query -> Solr -> result

use super::models::{SearchEndpoint, SearchRequest, SearchResult};
use crate::engine::{release, EngineConnector};
use crate::error::GatewayError;
use crate::query::StructuredQuery;
use std::sync::Arc;
use tracing::{debug, info};

/// Executes searches against the configured endpoint
pub struct QueryGateway {
    endpoint: Arc<SearchEndpoint>,
    connector: Arc<dyn EngineConnector>,
}

impl QueryGateway {
    pub fn new(endpoint: Arc<SearchEndpoint>, connector: Arc<dyn EngineConnector>) -> Self {
        Self {
            endpoint,
            connector,
        }
    }

    /// Structured query a request translates to
    pub fn build_query(&self, request: &SearchRequest) -> StructuredQuery {
        StructuredQuery::build(request, self.endpoint.field())
    }

    /// Run one search; the engine is contacted exactly once
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResult, GatewayError> {
        let query = self.build_query(request);
        debug!(
            "Searching {} page {} size {}",
            request.query(),
            request.page(),
            request.page_size()
        );

        let engine = self.connector.connect(&self.endpoint)?;
        let outcome = engine.query(&query).await;
        release(engine).await;

        let result = SearchResult::from(outcome?);
        info!(
            "Search '{}' returned {} of {} documents",
            request.query(),
            result.documents.len(),
            result.total_found
        );
        Ok(result)
    }
}
