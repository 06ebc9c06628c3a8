//! Common test utilities

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use chrono::{TimeZone, Utc};
use tower::ServiceExt;
use trendwire::config::ServerConfig;
use trendwire::models::{TrendPoint, TrendQuery, TrendSeries};
use trendwire::provider::{ProviderError, ProviderResult, TrendProvider};
use trendwire::server::TrendServer;

/// How the stub answers queries it has no canned series for
#[allow(dead_code)]
#[derive(Clone, Copy)]
pub enum Fallback {
    /// Report no data
    Empty,
    /// Fail as if the network were down
    NetworkDown,
    /// Fail as if the provider throttled us
    RateLimited,
    /// Fail as if the provider rejected the timeframe
    InvalidQuery,
}

/// In-memory provider keyed by (keyword, timeframe)
pub struct StubProvider {
    series: HashMap<(String, String), Vec<TrendPoint>>,
    fallback: Fallback,
    calls: Mutex<Vec<TrendQuery>>,
}

#[allow(dead_code)]
impl StubProvider {
    pub fn new(fallback: Fallback) -> Self {
        Self {
            series: HashMap::new(),
            fallback,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Register daily points starting at `start` (y, m, d)
    pub fn with_daily(
        mut self,
        keyword: &str,
        timeframe: &str,
        start: (i32, u32, u32),
        values: &[i64],
    ) -> Self {
        let first = Utc
            .with_ymd_and_hms(start.0, start.1, start.2, 0, 0, 0)
            .unwrap();
        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| TrendPoint::new(first + chrono::Duration::days(i as i64), *v))
            .collect();

        self.series
            .insert((keyword.to_string(), timeframe.to_string()), points);
        self
    }

    /// Queries received so far
    pub fn calls(&self) -> Vec<TrendQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TrendProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn interest_over_time(&self, query: &TrendQuery) -> ProviderResult<TrendSeries> {
        self.calls.lock().unwrap().push(query.clone());

        let key = (query.keyword.clone(), query.timeframe.clone());
        if let Some(points) = self.series.get(&key) {
            return Ok(TrendSeries::new(query.keyword.clone(), points.clone()));
        }

        match self.fallback {
            Fallback::Empty => Ok(TrendSeries::empty(query.keyword.clone())),
            Fallback::NetworkDown => {
                // port 1 is never listening, so this is a real connect failure
                let err = reqwest::Client::builder()
                    .no_proxy()
                    .build()
                    .unwrap()
                    .get("http://127.0.0.1:1/")
                    .send()
                    .await
                    .expect_err("nothing listens on port 1");
                Err(ProviderError::from_transport(err))
            }
            Fallback::RateLimited => Err(ProviderError::RateLimited),
            Fallback::InvalidQuery => Err(ProviderError::InvalidQuery(format!(
                "Invalid time: {}",
                query.timeframe
            ))),
        }
    }
}

/// Build a router over the given provider with default server settings
pub fn router_with(provider: Arc<dyn TrendProvider>) -> axum::Router {
    TrendServer::new(ServerConfig::default(), provider).build_router()
}

/// Send a GET with an Origin header through the router
pub async fn get(router: axum::Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("origin", "https://dashboard.example.com")
        .body(Body::empty())
        .unwrap();

    router.oneshot(request).await.unwrap()
}

/// Read a response body as JSON
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
