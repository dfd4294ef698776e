//! Connection prober for the configured Solr core

use super::models::{ProbeResult, SearchEndpoint};
use crate::engine::{release, EngineConnector};
use std::sync::Arc;
use tracing::{info, warn};

/// Checks that the search engine is reachable and healthy
pub struct ConnectionProber {
    endpoint: Arc<SearchEndpoint>,
    connector: Arc<dyn EngineConnector>,
}

impl ConnectionProber {
    pub fn new(endpoint: Arc<SearchEndpoint>, connector: Arc<dyn EngineConnector>) -> Self {
        Self {
            endpoint,
            connector,
        }
    }

    /// Ping the engine. Failures are reported in the result, never raised.
    pub async fn probe(&self) -> ProbeResult {
        let url = self.endpoint.url();

        let engine = match self.connector.connect(&self.endpoint) {
            Ok(engine) => engine,
            Err(e) => {
                warn!("Probe of {} failed before connecting: {}", url, e);
                return ProbeResult::failure(url, &e);
            }
        };

        let outcome = engine.ping().await;
        release(engine).await;

        match outcome {
            Ok(ping) => {
                info!("Probe of {} succeeded in {}ms", url, ping.qtime);
                ProbeResult::success(url, ping)
            }
            Err(e) => {
                warn!("Probe of {} failed: {}", url, e);
                ProbeResult::failure(url, &e)
            }
        }
    }
}
