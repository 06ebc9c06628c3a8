//! External trend-data providers
//!
//! The HTTP handler only depends on [`TrendProvider`]; the production
//! implementation is [`GoogleTrendsClient`].
//!
//! # Usage
//!
//! ```no_run
//! use trendwire::models::TrendQuery;
//! use trendwire::provider::{GoogleTrendsClient, TrendProvider};
//!
//! # async fn run() -> Result<(), trendwire::provider::ProviderError> {
//! let client = GoogleTrendsClient::new(Default::default())?;
//! let series = client
//!     .interest_over_time(&TrendQuery::new("ethereum", "today 3-m"))
//!     .await?;
//! println!("{} points", series.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod google;
pub mod protocol;

use async_trait::async_trait;

use crate::models::{TrendQuery, TrendSeries};

pub use error::{ProviderError, ProviderResult};
pub use google::GoogleTrendsClient;

/// Source of interest-over-time data
#[async_trait]
pub trait TrendProvider: Send + Sync {
    /// Provider name, reported by the health endpoint
    fn name(&self) -> &str;

    /// Fetch the series for one keyword and timeframe.
    ///
    /// An empty series means the provider has no data for the query; it is
    /// not an error.
    async fn interest_over_time(&self, query: &TrendQuery) -> ProviderResult<TrendSeries>;
}
