//! Web server module
//!
//! Provides the HTTP API of the gateway.

mod handlers;
mod routes;
mod state;

pub use handlers::SearchParams;
pub use routes::create_router;
pub use state::AppState;
