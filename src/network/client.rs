//! HTTP client for making requests to the search engine

use crate::config::OutgoingSettings;
use crate::engine::{EngineRequest, EngineResponse};
use crate::error::EngineError;
use reqwest::{Client, Response};
use std::time::Duration;

/// Standard accept header for Solr JSON responses
const ACCEPT_JSON: &str = "application/json,text/javascript,*/*;q=0.01";

/// HTTP client wrapper configured from the outgoing settings
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
    extra_headers: Vec<(String, String)>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, EngineError> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self, EngineError> {
        let mut builder = Client::builder()
            .timeout(secs(settings.request_timeout)?)
            .connect_timeout(secs(settings.connect_timeout)?)
            .pool_max_idle_per_host(0)
            .gzip(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        // Proxy settings
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            user_agent: format!("solr-gateway/{}", crate::VERSION),
            extra_headers: settings
                .extra_headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        })
    }

    /// Execute an engine request
    pub async fn execute(&self, request: EngineRequest) -> Result<EngineResponse, EngineError> {
        let mut req_builder = self
            .client
            .get(&request.url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", ACCEPT_JSON);

        for (key, value) in &self.extra_headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    async fn parse_response(response: Response) -> Result<EngineResponse, EngineError> {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let text = response.text().await?;

        Ok(EngineResponse { status, text, url })
    }
}

fn secs(value: f64) -> Result<Duration, EngineError> {
    Duration::try_from_secs_f64(value)
        .map_err(|e| EngineError::Client(format!("invalid timeout {}: {}", value, e)))
}
