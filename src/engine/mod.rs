//! Search engine module
//!
//! Defines the `SearchEngine` seam and its Solr implementation.

mod solr;
mod traits;

#[cfg(test)]
pub(crate) mod mock;

pub use solr::{SolrClient, SolrConnector};
pub use traits::*;
