//! Route definitions

use super::handlers;
use super::state::AppState;
use crate::config::CorsSettings;
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.settings.cors);

    Router::new()
        // API routes
        .route("/api/search", get(handlers::search))
        .route("/api/test-connection", get(handlers::test_connection))
        .route("/health", get(handlers::health))
        // Add middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // Add state
        .with_state(state)
}

/// Build the CORS layer; credentials are only allowed with explicit origins
fn cors_layer(settings: &CorsSettings) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if settings.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(settings.allow_credentials)
}
