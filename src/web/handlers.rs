//! HTTP request handlers

use super::state::AppState;
use crate::error::GatewayError;
use crate::search::{ProbeResult, SearchRequest, SearchResponse};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search query
    pub q: Option<String>,
    /// Page number (0-indexed)
    pub page: Option<i64>,
    /// Page size
    pub size: Option<i64>,
}

/// Search handler
pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, GatewayError> {
    let Query(params) = params.map_err(|e| GatewayError::InvalidArgument(e.body_text()))?;
    let request = SearchRequest::new(
        params.q.unwrap_or_default(),
        params.page,
        params.size,
        state.max_page_size(),
    )?;

    let result = state.gateway.search(&request).await?;

    Ok(Json(SearchResponse::new(result, &request)))
}

/// Solr connection test handler
pub async fn test_connection(State(state): State<AppState>) -> (StatusCode, Json<ProbeResult>) {
    let result = state.prober.probe().await;
    let status = if result.is_success() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(result))
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
