//! Application state shared across handlers

use crate::config::Settings;
use crate::engine::{EngineConnector, SolrConnector};
use crate::error::GatewayError;
use crate::search::{ConnectionProber, QueryGateway};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Search executor
    pub gateway: Arc<QueryGateway>,
    /// Health checker for the search engine
    pub prober: Arc<ConnectionProber>,
}

impl AppState {
    /// Create application state talking to Solr
    pub fn new(settings: Settings) -> Result<Self, GatewayError> {
        let connector = Arc::new(SolrConnector::new(settings.outgoing.clone()));
        Self::with_connector(settings, connector)
    }

    /// Create application state with a custom engine connector
    pub fn with_connector(
        settings: Settings,
        connector: Arc<dyn EngineConnector>,
    ) -> Result<Self, GatewayError> {
        let endpoint = Arc::new(settings.endpoint()?);
        let gateway = Arc::new(QueryGateway::new(endpoint.clone(), connector.clone()));
        let prober = Arc::new(ConnectionProber::new(endpoint, connector));

        Ok(Self {
            settings: Arc::new(settings),
            gateway,
            prober,
        })
    }

    /// Largest page size a client may request
    pub fn max_page_size(&self) -> u32 {
        self.settings.search.max_page_size
    }
}
