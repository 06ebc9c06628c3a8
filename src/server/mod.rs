//! HTTP surface
//!
//! ```text
//! GET /api/trends?keyword=<k>&timeframe=<t>  -> {"values": [...], "labels": [...]}
//! GET /api/health                            -> service status
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use trendwire::config::Config;
//! use trendwire::provider::GoogleTrendsClient;
//! use trendwire::server::TrendServer;
//!
//! let config = Config::default();
//! let provider = Arc::new(GoogleTrendsClient::new(config.provider.clone())?);
//! TrendServer::new(config.server, provider).start().await?;
//! ```

pub mod api;
pub mod server;

pub use api::{create_router, ApiError, ErrorResponse, HealthResponse};
pub use server::{AppState, ServerError, ServerInfo, TrendServer};
