//! Error types for trend providers

use thiserror::Error;

use crate::error::ErrorCategory;

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors raised while talking to an external trend-data provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport-level failure (connect, TLS, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out
    #[error("Request timeout")]
    Timeout,

    /// Provider throttled or blocked the request (HTTP 429)
    #[error("Provider rate limit exceeded")]
    RateLimited,

    /// Provider rejected the query, usually a malformed timeframe (HTTP 400)
    #[error("Provider rejected query: {0}")]
    InvalidQuery(String),

    /// Any other non-success status
    #[error("Provider returned status {0}")]
    Status(u16),

    /// Explore response did not describe the widget we need
    #[error("Provider response is missing the {0} widget")]
    MissingWidget(&'static str),

    /// Body could not be decoded into the expected shape
    #[error("Decoding error: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Build from a reqwest error, separating out timeouts
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }

    /// Map a non-success upstream status
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            400 => Self::InvalidQuery(summarize(body)),
            429 => Self::RateLimited,
            _ => Self::Status(status),
        }
    }

    /// Coarse class of the failure, for logs
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Http(_) | Self::Timeout | Self::RateLimited | Self::Status(_) => {
                ErrorCategory::Network
            }
            Self::InvalidQuery(_) => ErrorCategory::Input,
            Self::MissingWidget(_) | Self::Decode(_) => ErrorCategory::Parsing,
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// First line of an upstream body, capped, for error messages
fn summarize(body: &str) -> String {
    let line = body.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");
    let mut out: String = line.chars().take(200).collect();
    if out.is_empty() {
        out.push_str("bad request");
    }
    out
}
