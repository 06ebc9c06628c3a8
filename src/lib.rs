//! trendwire - Google Trends interest-over-time over HTTP
//!
//! Serves `GET /api/trends?keyword=&timeframe=` and answers with two
//! parallel arrays, `values` and `labels` (`YYYY-MM-DD`), suitable for a
//! browser chart.
//!
//! # Architecture
//!
//! - [`config`] - Configuration defaults, TOML file and environment overrides
//! - [`models`] - Query, series and response types
//! - [`provider`] - The [`provider::TrendProvider`] seam and the Google Trends client
//! - [`server`] - Axum router, handlers and server lifecycle
//! - [`error`] - Configuration error type and failure categories
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use trendwire::config::Config;
//! use trendwire::provider::GoogleTrendsClient;
//! use trendwire::server::TrendServer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let provider = Arc::new(GoogleTrendsClient::new(config.provider.clone())?);
//!     TrendServer::new(config.server, provider).start().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod provider;
pub mod server;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{TrendQuery, TrendQueryParams, TrendResponse, TrendSeries};
    pub use crate::provider::{GoogleTrendsClient, ProviderError, TrendProvider};
    pub use crate::server::TrendServer;
}

// Direct re-exports for convenience
pub use models::{TrendQuery, TrendResponse, TrendSeries};
