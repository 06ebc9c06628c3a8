//! Crate-level error types
//!
//! [`Error`] covers configuration loading. Provider and server failures keep
//! their own types ([`crate::provider::ProviderError`],
//! [`crate::server::ServerError`]); [`ErrorCategory`] classifies provider
//! failures for logs.

use thiserror::Error;

/// Classification of provider failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout, rate limit)
    Network,
    /// Parsing and data extraction errors
    Parsing,
    /// The caller's query was rejected
    Input,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Parsing => "parsing",
            Self::Input => "input",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum Error {
    /// TOML config parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
