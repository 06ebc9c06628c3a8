//! Configuration management for trendwire
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `TRENDWIRE_*` environment variables. CLI flags are applied last by the
//! binary.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default listening address
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5001";

/// Default Google Trends host
pub const DEFAULT_PROVIDER_URL: &str = "https://trends.google.com";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Trend provider configuration
    pub provider: ProviderConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_address: SocketAddr,

    /// Send permissive CORS headers
    pub enable_cors: bool,

    /// Log every request through the trace layer
    pub enable_request_logging: bool,
}

/// Trend provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Provider base URL
    pub base_url: String,

    /// Interface language (`hl`)
    pub language: String,

    /// Timezone offset in minutes (`tz`)
    pub tz_offset: i32,

    /// Geographic restriction, empty for worldwide
    pub geo: String,

    /// Category filter, 0 for all categories
    pub category: u32,

    /// Property filter, empty for web search
    pub property: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// User agent string
    pub user_agent: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            enable_cors: true,
            enable_request_logging: true,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_PROVIDER_URL),
            language: String::from("en-US"),
            tz_offset: 360,
            geo: String::new(),
            category: 0,
            property: String::new(),
            request_timeout_secs: 30,
            user_agent: format!(
                "Mozilla/5.0 (compatible; trendwire/{})",
                env!("CARGO_PKG_VERSION")
            ),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 5001))
}

impl Config {
    /// Load defaults overridden by environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load configuration from a TOML file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::with_source(format!("Failed to read config file: {}", path.display()), e)
        })?;

        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the full configuration: optional file, then environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `TRENDWIRE_*` environment overrides
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(addr) = std::env::var("TRENDWIRE_BIND_ADDRESS") {
            self.server.bind_address = addr
                .parse()
                .map_err(|_| Error::config(format!("Invalid TRENDWIRE_BIND_ADDRESS: {addr}")))?;
        }

        if let Ok(url) = std::env::var("TRENDWIRE_PROVIDER_URL") {
            self.provider.base_url = url;
        }

        if let Ok(timeout) = std::env::var("TRENDWIRE_REQUEST_TIMEOUT") {
            self.provider.request_timeout_secs = timeout.parse().map_err(|_| {
                Error::config(format!("Invalid TRENDWIRE_REQUEST_TIMEOUT: {timeout}"))
            })?;
        }

        if let Ok(level) = std::env::var("TRENDWIRE_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(format) = std::env::var("TRENDWIRE_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.provider.request_timeout_secs == 0 {
            return Err(Error::config("request_timeout_secs must be greater than 0"));
        }

        url::Url::parse(&self.provider.base_url).map_err(|e| {
            Error::config(format!("Invalid provider base_url '{}': {e}", self.provider.base_url))
        })?;

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(Error::config(format!(
                "Unknown log format '{}', expected text or json",
                self.logging.format
            )));
        }

        Ok(())
    }
}

impl ProviderConfig {
    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl ServerConfig {
    /// Create a new config builder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    bind_address: Option<SocketAddr>,
    enable_cors: Option<bool>,
    enable_request_logging: Option<bool>,
}

impl ServerConfigBuilder {
    /// Set bind address
    pub fn bind_address(mut self, addr: SocketAddr) -> Self {
        self.bind_address = Some(addr);
        self
    }

    /// Set bind address from string
    pub fn bind_address_str(mut self, addr: &str) -> Result<Self> {
        self.bind_address = Some(
            addr.parse()
                .map_err(|_| Error::config(format!("Invalid address: {addr}")))?,
        );
        Ok(self)
    }

    /// Enable/disable CORS
    pub fn enable_cors(mut self, enable: bool) -> Self {
        self.enable_cors = Some(enable);
        self
    }

    /// Enable/disable request logging
    pub fn enable_request_logging(mut self, enable: bool) -> Self {
        self.enable_request_logging = Some(enable);
        self
    }

    /// Build the config
    pub fn build(self) -> ServerConfig {
        ServerConfig {
            bind_address: self.bind_address.unwrap_or_else(default_bind_address),
            enable_cors: self.enable_cors.unwrap_or(true),
            enable_request_logging: self.enable_request_logging.unwrap_or(true),
        }
    }
}
