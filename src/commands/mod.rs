pub mod query;
pub mod serve;

use std::path::Path;

use anyhow::{Context, Result};
use trendwire::config::Config;

// Re-export command functions for convenience
pub use query::{query, QueryParams};
pub use serve::{serve, ServeParams};

/// Load config from an optional file plus the environment
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = Config::load(path).with_context(|| match path {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to load configuration".to_string(),
    })?;
    Ok(config)
}
