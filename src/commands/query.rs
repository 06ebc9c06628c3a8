use anyhow::{Context, Result};

use trendwire::config::Config;
use trendwire::models::{TrendQueryParams, TrendResponse};
use trendwire::provider::{GoogleTrendsClient, TrendProvider};

/// CLI arguments for the query command
pub struct QueryParams {
    pub keyword: Option<String>,
    pub timeframe: Option<String>,
}

/// Fetch one series and print it the way the HTTP endpoint would
pub async fn query(config: Config, params: QueryParams) -> Result<()> {
    let query = TrendQueryParams {
        keyword: params.keyword,
        timeframe: params.timeframe,
    }
    .resolve();

    let provider = GoogleTrendsClient::new(config.provider)
        .context("Failed to create Google Trends client")?;

    let series = provider
        .interest_over_time(&query)
        .await
        .with_context(|| format!("Trend lookup failed for '{}'", query.keyword))?;

    tracing::info!(
        keyword = %query.keyword,
        timeframe = %query.timeframe,
        points = series.len(),
        "Trend lookup complete"
    );

    let payload = serde_json::to_string_pretty(&TrendResponse::from(&series))?;
    println!("{payload}");
    Ok(())
}
