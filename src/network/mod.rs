//! HTTP networking module
//!
//! Provides the HTTP client used to talk to Solr.

mod client;

pub use client::HttpClient;
