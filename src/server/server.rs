//! Trend server implementation
//!
//! Owns the router, the CORS and tracing layers, and the listener.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::provider::TrendProvider;

use super::api::create_router;

// ============================================================================
// App State
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Trend data source
    pub provider: Arc<dyn TrendProvider>,

    /// Server start time
    pub start_time: Instant,
}

// ============================================================================
// Trend Server
// ============================================================================

/// Process-wide HTTP server
pub struct TrendServer {
    config: ServerConfig,
    state: AppState,
}

impl TrendServer {
    /// Create a new server around a provider
    pub fn new(config: ServerConfig, provider: Arc<dyn TrendProvider>) -> Self {
        let state = AppState {
            provider,
            start_time: Instant::now(),
        };

        Self { config, state }
    }

    /// Get the application state
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let mut router = create_router(self.state.clone());

        if self.config.enable_cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        if self.config.enable_request_logging {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Start the server
    pub async fn start(&self) -> Result<(), ServerError> {
        self.start_with_shutdown(std::future::pending()).await
    }

    /// Start with graceful shutdown
    pub async fn start_with_shutdown(
        &self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<(), ServerError> {
        let router = self.build_router();
        let addr = self.config.bind_address;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(format!("{addr}: {e}")))?;

        tracing::info!(
            address = %addr,
            provider = self.state.provider.name(),
            "Trend server listening"
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ServerError::ServeError(e.to_string()))?;

        tracing::info!("Trend server shutdown complete");
        Ok(())
    }

    /// Get server info
    pub fn info(&self) -> ServerInfo {
        ServerInfo {
            bind_address: self.config.bind_address,
            provider: self.state.provider.name().to_string(),
            cors_enabled: self.config.enable_cors,
            request_logging_enabled: self.config.enable_request_logging,
        }
    }
}

/// Server information
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub bind_address: SocketAddr,
    pub provider: String,
    pub cors_enabled: bool,
    pub request_logging_enabled: bool,
}

impl ServerInfo {
    /// Format as display string
    pub fn display(&self) -> String {
        format!(
            "Trend Server\n\
             {:-<40}\n\
             Bind Address: {}\n\
             Provider: {}\n\
             CORS: {}\n\
             Request Logging: {}",
            "",
            self.bind_address,
            self.provider,
            if self.cors_enabled { "enabled" } else { "disabled" },
            if self.request_logging_enabled { "enabled" } else { "disabled" }
        )
    }
}

// ============================================================================
// Server Errors
// ============================================================================

/// Server errors
#[derive(Debug, Clone)]
pub enum ServerError {
    /// Failed to bind to address
    BindError(String),

    /// Server error
    ServeError(String),
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BindError(msg) => write!(f, "Failed to bind: {}", msg),
            Self::ServeError(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl std::error::Error for ServerError {}

// ============================================================================
// Tests
// ============================================================================
