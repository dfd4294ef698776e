//! Settings structures for the gateway configuration

use crate::error::GatewayError;
use crate::search::SearchEndpoint;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use url::Url;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub solr: SolrSettings,
    pub search: SearchSettings,
    pub outgoing: OutgoingSettings,
    pub cors: CorsSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (SOLR_GATEWAY_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    fn merge_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("SOLR_GATEWAY_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("SOLR_GATEWAY_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = var("SOLR_GATEWAY_SOLR_HOST") {
            self.solr.host = val;
        }
        if let Some(val) = var("SOLR_GATEWAY_SOLR_CORE") {
            self.solr.core = val;
        }
        if let Some(val) = var("SOLR_GATEWAY_SEARCH_FIELD") {
            self.search.field = val;
        }
        if let Some(val) = var("SOLR_GATEWAY_REQUEST_TIMEOUT") {
            if let Ok(timeout) = val.parse() {
                self.outgoing.request_timeout = timeout;
            }
        }
    }

    /// Validate the Solr section and build the immutable endpoint
    pub fn endpoint(&self) -> Result<SearchEndpoint, GatewayError> {
        let host = Url::parse(self.solr.host.trim()).map_err(|e| {
            GatewayError::Config(format!("invalid solr.host '{}': {}", self.solr.host, e))
        })?;

        if !matches!(host.scheme(), "http" | "https") {
            return Err(GatewayError::Config(format!(
                "solr.host must use http or https, got '{}'",
                host.scheme()
            )));
        }

        let core = self.solr.core.trim().trim_matches('/');
        if core.is_empty() {
            return Err(GatewayError::Config("solr.core must not be empty".to_string()));
        }

        let field = self.search.field.trim();
        if field.is_empty() {
            return Err(GatewayError::Config("search.field must not be empty".to_string()));
        }

        Ok(SearchEndpoint::new(host, core, field))
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Location of the Solr core queried by the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolrSettings {
    /// Base URL of the Solr server, e.g. http://localhost:8983/solr
    pub host: String,
    /// Core (collection) name
    pub core: String,
}

impl Default for SolrSettings {
    fn default() -> Self {
        Self {
            host: "http://localhost:8983/solr".to_string(),
            core: "documents".to_string(),
        }
    }
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Field used for both matching and highlighting
    pub field: String,
    /// Largest accepted page size
    pub max_page_size: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            field: "text".to_string(),
            max_page_size: 1000,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Connect timeout in seconds
    pub connect_timeout: f64,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10.0,
            connect_timeout: 5.0,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Cross-origin settings for browser clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsSettings {
    /// Allowed origins; "*" allows any origin and disables credentials
    pub allowed_origins: Vec<String>,
    /// Allow cookies and authorization headers
    pub allow_credentials: bool,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:5173".to_string()],
            allow_credentials: true,
        }
    }
}

impl CorsSettings {
    /// Whether any origin is allowed
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.search.field, "text");
        assert!(settings.cors.allow_credentials);
        assert!(!settings.cors.allows_any_origin());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
solr:
  host: "http://solr.internal:8983/solr"
  core: "articles"
search:
  field: "mytext"
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.solr.core, "articles");
        assert_eq!(settings.search.field, "mytext");
        assert_eq!(settings.search.max_page_size, 1000);
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.outgoing.request_timeout, 10.0);
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings::default();
        settings.merge_vars(|key| match key {
            "SOLR_GATEWAY_PORT" => Some("9090".to_string()),
            "SOLR_GATEWAY_SOLR_CORE" => Some("books".to_string()),
            "SOLR_GATEWAY_REQUEST_TIMEOUT" => Some("not-a-number".to_string()),
            _ => None,
        });

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.solr.core, "books");
        assert_eq!(settings.outgoing.request_timeout, 10.0);
    }

    #[test]
    fn test_endpoint_url() {
        let mut settings = Settings::default();
        settings.solr.host = "http://localhost:8983/solr/".to_string();
        settings.solr.core = "mycore".to_string();

        let endpoint = settings.endpoint().unwrap();
        assert_eq!(endpoint.url(), "http://localhost:8983/solr/mycore");
        assert_eq!(endpoint.field(), "text");
    }

    #[test]
    fn test_endpoint_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.solr.host = "not a url".to_string();
        assert!(matches!(settings.endpoint(), Err(GatewayError::Config(_))));

        let mut settings = Settings::default();
        settings.solr.host = "ftp://localhost/solr".to_string();
        assert!(settings.endpoint().is_err());

        let mut settings = Settings::default();
        settings.solr.core = " ".to_string();
        assert!(settings.endpoint().is_err());

        let mut settings = Settings::default();
        settings.search.field = String::new();
        assert!(settings.endpoint().is_err());
    }
}
