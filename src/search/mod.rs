//! Search module
//!
//! The query gateway and connection prober, plus the models they exchange.

mod gateway;
mod models;
mod prober;

pub use gateway::QueryGateway;
pub use models::*;
pub use prober::ConnectionProber;
