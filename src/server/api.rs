//! REST API handlers
//!
//! This module defines the routes, handlers and error mapping for the
//! trends endpoint.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::models::{TrendQueryParams, TrendResponse};
use crate::provider::ProviderError;

use super::server::AppState;

// ============================================================================
// API Response Types
// ============================================================================

/// Error body returned for failed trend lookups
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: code.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub provider: String,
}

/// Provider failure as seen by HTTP callers
#[derive(Debug)]
pub struct ApiError(pub ProviderError);

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code and machine-readable code for the wrapped error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            ProviderError::InvalidQuery(_) => (StatusCode::BAD_REQUEST, "INVALID_QUERY"),
            ProviderError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "UPSTREAM_RATE_LIMITED"),
            ProviderError::MissingWidget(_) | ProviderError::Decode(_) => {
                (StatusCode::BAD_GATEWAY, "UPSTREAM_MALFORMED")
            }
            ProviderError::Http(_) | ProviderError::Timeout | ProviderError::Status(_) => {
                (StatusCode::BAD_GATEWAY, "UPSTREAM_UNAVAILABLE")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let category = self.0.category();
        if status == StatusCode::BAD_REQUEST {
            tracing::warn!(error = %self.0, %category, "Trend query rejected by provider");
        } else {
            tracing::error!(error = %self.0, %category, code, "Trend provider failure");
        }

        (status, Json(ErrorResponse::new(code, self.0.to_string()))).into_response()
    }
}

// ============================================================================
// API Routes
// ============================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/trends", get(get_trends))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        provider: state.provider.name().to_string(),
    })
}

/// Interest-over-time for one keyword.
///
/// Missing parameters fall back to `bitcoin` / `now 7-d`; a repeated one
/// uses its first value. A provider with no data yields empty `values` and
/// `labels` with 200.
async fn get_trends(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<TrendResponse>, ApiError> {
    let query = pairs.into_iter().collect::<TrendQueryParams>().resolve();

    tracing::info!(
        keyword = %query.keyword,
        timeframe = %query.timeframe,
        "Trend query"
    );

    let series = state.provider.interest_over_time(&query).await?;

    if series.is_empty() {
        tracing::info!(keyword = %query.keyword, "No trend data for query");
    }

    Ok(Json(TrendResponse::from(&series)))
}

// ============================================================================
// Tests
// ============================================================================
