//! Google Trends interest-over-time client
//!
//! Each query runs in its own session: a fresh HTTP client with its own
//! cookie jar is built, primed against the Trends landing page, then used
//! for the explore and multiline calls.

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::ProviderConfig;
use crate::models::{TrendQuery, TrendSeries};

use super::error::{ProviderError, ProviderResult};
use super::protocol::{
    decode_guarded, ExploreRequest, ExploreResponse, MultilineResponse, Widget,
    TIMESERIES_WIDGET,
};
use super::TrendProvider;

const EXPLORE_PATH: &str = "trends/api/explore";
const MULTILINE_PATH: &str = "trends/api/widgetdata/multiline";
const LANDING_PATH: &str = "trends/";

/// Google Trends provider
#[derive(Debug, Clone)]
pub struct GoogleTrendsClient {
    config: ProviderConfig,
}

impl GoogleTrendsClient {
    /// Create a client from provider configuration
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Decode` if the base URL is not a valid URL
    pub fn new(config: ProviderConfig) -> ProviderResult<Self> {
        url::Url::parse(&config.base_url).map_err(|e| {
            ProviderError::Decode(format!("invalid base URL {}: {e}", config.base_url))
        })?;

        Ok(Self { config })
    }

    /// Create a client pointed at a different host, keeping default settings
    pub fn with_base_url(base_url: &str) -> ProviderResult<Self> {
        Self::new(ProviderConfig {
            base_url: base_url.to_string(),
            ..ProviderConfig::default()
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Build the per-query HTTP session
    fn session(&self) -> ProviderResult<Client> {
        Client::builder()
            .timeout(self.config.request_timeout())
            .gzip(true)
            .cookie_store(true)
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(ProviderError::Http)
    }

    /// Country hint derived from the locale, e.g. `en-US` -> `US`.
    ///
    /// This is the last two characters of the locale, so a bare language
    /// such as `de` is passed through unchanged.
    fn geo_hint(&self) -> &str {
        let lang = self.config.language.as_str();
        match lang.char_indices().rev().nth(1) {
            Some((idx, _)) => &lang[idx..],
            None => lang,
        }
    }

    /// Prime the cookie jar. Failures are only logged; the explore call
    /// reports the real problem if the session is unusable.
    async fn prime_session(&self, client: &Client) {
        let result = client
            .get(self.endpoint(LANDING_PATH))
            .query(&[("geo", self.geo_hint())])
            .send()
            .await;

        match result {
            Ok(resp) => tracing::debug!(status = %resp.status(), "Trends session primed"),
            Err(e) => tracing::debug!(error = %e, "Failed to prime Trends session"),
        }
    }

    /// Resolve the TIMESERIES widget for a query
    async fn explore(&self, client: &Client, query: &TrendQuery) -> ProviderResult<Widget> {
        let req = ExploreRequest::single(
            query,
            &self.config.geo,
            self.config.category,
            &self.config.property,
        );
        let req = serde_json::to_string(&req)?;

        let request = client.get(self.endpoint(EXPLORE_PATH)).query(&[
            ("hl", self.config.language.clone()),
            ("tz", self.config.tz_offset.to_string()),
            ("req", req),
        ]);

        let explore: ExploreResponse = Self::send_guarded(request).await?;

        explore
            .widget(TIMESERIES_WIDGET)
            .cloned()
            .ok_or(ProviderError::MissingWidget(TIMESERIES_WIDGET))
    }

    /// Replay the widget against the multiline endpoint
    async fn timeseries(
        &self,
        client: &Client,
        query: &TrendQuery,
        widget: &Widget,
    ) -> ProviderResult<TrendSeries> {
        let req = widget.raw_request()?;

        let request = client.get(self.endpoint(MULTILINE_PATH)).query(&[
            ("req", req.to_string()),
            ("token", widget.token.clone()),
            ("tz", self.config.tz_offset.to_string()),
        ]);

        let multiline: MultilineResponse = Self::send_guarded(request).await?;
        multiline.into_series(&query.keyword)
    }

    /// Send a request and decode its guarded JSON body
    async fn send_guarded<T: DeserializeOwned>(request: RequestBuilder) -> ProviderResult<T> {
        let response = request.send().await.map_err(ProviderError::from_transport)?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_default();

        let body = response.text().await.map_err(ProviderError::from_transport)?;

        if !status.is_success() {
            tracing::warn!(status = %status, "Trends request failed");
            return Err(ProviderError::from_status(status.as_u16(), &body));
        }

        if !is_script_content(&content_type) {
            return Err(ProviderError::Decode(format!(
                "unexpected content type: {content_type}"
            )));
        }

        decode_guarded(&body)
    }
}

/// Trends serves its JSON as either application/json or javascript
fn is_script_content(content_type: &str) -> bool {
    let ct = content_type.to_ascii_lowercase();
    ct.is_empty()
        || ct.contains("application/json")
        || ct.contains("application/javascript")
        || ct.contains("text/javascript")
}

#[async_trait]
impl TrendProvider for GoogleTrendsClient {
    fn name(&self) -> &str {
        "google-trends"
    }

    async fn interest_over_time(&self, query: &TrendQuery) -> ProviderResult<TrendSeries> {
        tracing::debug!(
            keyword = %query.keyword,
            timeframe = %query.timeframe,
            "Querying Google Trends"
        );

        let client = self.session()?;
        self.prime_session(&client).await;

        let widget = self.explore(&client, query).await?;
        let series = self.timeseries(&client, query, &widget).await?;

        tracing::debug!(points = series.len(), "Google Trends query complete");
        Ok(series)
    }
}
