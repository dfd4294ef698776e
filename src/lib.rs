//! Solr Gateway: an HTTP front for full-text search on Apache Solr
//!
//! Requests are translated into field-scoped, paginated, highlighted Solr
//! queries, and Solr's answer is reshaped into a small JSON envelope.

pub mod config;
pub mod engine;
pub mod error;
pub mod network;
pub mod query;
pub mod search;
pub mod web;

pub use config::Settings;
pub use error::{EngineError, GatewayError};
pub use search::{ConnectionProber, QueryGateway, SearchEndpoint, SearchRequest, SearchResult};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
