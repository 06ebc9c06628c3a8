//! Integration tests for GoogleTrendsClient using wiremock
//!
//! The mock server plays the three Trends endpoints: the landing page used
//! to prime cookies, explore, and widgetdata/multiline.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use common::{get, json_body, router_with};
use serde_json::json;
use trendwire::config::ProviderConfig;
use trendwire::models::TrendQuery;
use trendwire::provider::{GoogleTrendsClient, ProviderError, TrendProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JSON: &str = "application/json; charset=utf-8";

/// Signed widget request, deliberately not in key order
const TIMESERIES_REQUEST: &str = concat!(
    r#"{"time":"2024-01-01 2024-01-07","resolution":"DAY","locale":"en-US","#,
    r#""comparisonItem":[{"geo":{},"complexKeywordsRestriction":"#,
    r#"{"keyword":[{"type":"BROAD","value":"ethereum"}]}}],"#,
    r#""requestOptions":{"property":"","backend":"IZG","category":0}}"#,
);

fn explore_body() -> String {
    format!(
        r#")]}}'
{{"widgets":[
  {{"id":"TIMESERIES","title":"Interest over time","token":"tok-ts",
   "request":{TIMESERIES_REQUEST}}},
  {{"id":"GEO_MAP","title":"Interest by region","token":"tok-geo","request":{{}}}}
]}}"#
    )
}

fn explore_ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(explore_body(), JSON)
}

fn multiline_ok(values: &[i64]) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(multiline_body(values), JSON)
}

/// Seven daily points, 2024-01-01 .. 2024-01-07 (UTC midnight)
fn multiline_body(values: &[i64]) -> String {
    let entries: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let ts = 1_704_067_200 + (i as i64) * 86_400;
            format!(
                "{{\"time\":\"{ts}\",\"formattedTime\":\"day {i}\",\"value\":[{v}],\
                 \"hasData\":[true],\"formattedValue\":[\"{v}\"]}}"
            )
        })
        .collect();

    format!(
        ")]}}',\n{{\"default\":{{\"timelineData\":[{}],\"averages\":[]}}}}",
        entries.join(",")
    )
}

async fn mount_landing(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/trends/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(server)
        .await;
}

async fn mount_explore(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/trends/api/explore"))
        .respond_with(template)
        .mount(server)
        .await;
}

async fn mount_multiline(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/trends/api/widgetdata/multiline"))
        .and(query_param("req", TIMESERIES_REQUEST))
        .and(query_param("token", "tok-ts"))
        .and(query_param("tz", "360"))
        .respond_with(template)
        .mount(server)
        .await;
}

fn client(server: &MockServer) -> GoogleTrendsClient {
    GoogleTrendsClient::with_base_url(&server.uri()).unwrap()
}

/// Full happy path: explore parameters are the fixed locale/tz/category/geo/property
#[tokio::test]
async fn test_interest_over_time_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trends/"))
        .and(query_param("geo", "US"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let req = concat!(
        r#"{"comparisonItem":[{"keyword":"ethereum","time":"now 7-d","geo":""}],"#,
        r#""category":0,"property":""}"#,
    );
    Mock::given(method("GET"))
        .and(path("/trends/api/explore"))
        .and(query_param("hl", "en-US"))
        .and(query_param("tz", "360"))
        .and(query_param("req", req))
        .respond_with(explore_ok())
        .expect(1)
        .mount(&server)
        .await;

    mount_multiline(&server, multiline_ok(&[10, 12, 15, 20, 18, 22, 25])).await;

    let series = client(&server)
        .interest_over_time(&TrendQuery::new("ethereum", "now 7-d"))
        .await
        .expect("query should succeed");

    assert_eq!(series.keyword, "ethereum");
    let values: Vec<i64> = series.points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![10, 12, 15, 20, 18, 22, 25]);
    let labels: Vec<String> = series.points.iter().map(|p| p.label()).collect();
    assert_eq!(labels.first().unwrap(), "2024-01-01");
    assert_eq!(labels.last().unwrap(), "2024-01-07");
}

#[tokio::test]
async fn test_empty_timeline_is_not_an_error() {
    let server = MockServer::start().await;
    mount_landing(&server).await;
    mount_explore(&server, explore_ok()).await;
    mount_multiline(&server, multiline_ok(&[])).await;

    let series = client(&server)
        .interest_over_time(&TrendQuery::default())
        .await
        .unwrap();

    assert!(series.is_empty());
    assert_eq!(series.keyword, "bitcoin");
}

#[tokio::test]
async fn test_landing_failure_is_ignored() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trends/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_explore(&server, explore_ok()).await;
    mount_multiline(&server, multiline_ok(&[1, 2])).await;

    let series = client(&server)
        .interest_over_time(&TrendQuery::default())
        .await
        .unwrap();

    assert_eq!(series.len(), 2);
}

#[tokio::test]
async fn test_rate_limited() {
    let server = MockServer::start().await;
    mount_landing(&server).await;
    mount_explore(&server, ResponseTemplate::new(429)).await;

    let result = client(&server)
        .interest_over_time(&TrendQuery::default())
        .await;

    assert!(matches!(result, Err(ProviderError::RateLimited)));
}

#[tokio::test]
async fn test_invalid_timeframe_rejected() {
    let server = MockServer::start().await;
    mount_landing(&server).await;
    mount_explore(
        &server,
        ResponseTemplate::new(400).set_body_string("Invalid time specified"),
    )
    .await;

    let result = client(&server)
        .interest_over_time(&TrendQuery::new("bitcoin", "last tuesday"))
        .await;

    match result {
        Err(ProviderError::InvalidQuery(msg)) => assert_eq!(msg, "Invalid time specified"),
        other => panic!("Expected InvalidQuery, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_status() {
    let server = MockServer::start().await;
    mount_landing(&server).await;
    mount_explore(&server, explore_ok()).await;
    mount_multiline(&server, ResponseTemplate::new(503)).await;

    let result = client(&server)
        .interest_over_time(&TrendQuery::default())
        .await;

    assert!(matches!(result, Err(ProviderError::Status(503))));
}

#[tokio::test]
async fn test_missing_timeseries_widget() {
    let server = MockServer::start().await;
    mount_landing(&server).await;
    mount_explore(
        &server,
        ResponseTemplate::new(200).set_body_raw(
            r#")]}'{"widgets":[{"id":"GEO_MAP","token":"g","request":{}}]}"#,
            JSON,
        ),
    )
    .await;

    let result = client(&server)
        .interest_over_time(&TrendQuery::default())
        .await;

    assert!(matches!(result, Err(ProviderError::MissingWidget("TIMESERIES"))));
}

#[tokio::test]
async fn test_html_block_page_is_decode_error() {
    let server = MockServer::start().await;
    mount_landing(&server).await;
    mount_explore(
        &server,
        ResponseTemplate::new(200)
            .set_body_raw("<html>unusual traffic</html>", "text/html"),
    )
    .await;

    let result = client(&server)
        .interest_over_time(&TrendQuery::default())
        .await;

    assert!(matches!(result, Err(ProviderError::Decode(_))));
}

#[tokio::test]
async fn test_timeout() {
    let server = MockServer::start().await;
    mount_landing(&server).await;
    mount_explore(
        &server,
        explore_ok().set_delay(Duration::from_secs(5)),
    )
    .await;

    let provider = GoogleTrendsClient::new(ProviderConfig {
        base_url: server.uri(),
        request_timeout_secs: 1,
        ..ProviderConfig::default()
    })
    .unwrap();

    let result = provider.interest_over_time(&TrendQuery::default()).await;

    assert!(
        matches!(result, Err(ProviderError::Timeout)),
        "Expected timeout, got: {:?}",
        result
    );
}

#[tokio::test]
async fn test_connection_refused() {
    let provider = GoogleTrendsClient::new(ProviderConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        request_timeout_secs: 2,
        ..ProviderConfig::default()
    })
    .unwrap();

    let result = provider.interest_over_time(&TrendQuery::default()).await;

    assert!(
        matches!(result, Err(ProviderError::Http(_))),
        "Expected transport error, got: {:?}",
        result
    );
}

/// Router in front of the real client, mock Trends behind it
#[tokio::test]
async fn test_endpoint_over_mock_trends() {
    let server = MockServer::start().await;
    mount_landing(&server).await;
    mount_explore(&server, explore_ok()).await;
    mount_multiline(&server, multiline_ok(&[10, 12, 15, 20, 18, 22, 25])).await;

    let router = router_with(Arc::new(client(&server)));
    let response = get(router, "/api/trends?keyword=ethereum&timeframe=now%207-d").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({
            "values": [10, 12, 15, 20, 18, 22, 25],
            "labels": [
                "2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04",
                "2024-01-05", "2024-01-06", "2024-01-07"
            ]
        })
    );
}

#[tokio::test]
async fn test_endpoint_when_trends_is_down() {
    let server = MockServer::start().await;
    mount_landing(&server).await;
    mount_explore(&server, ResponseTemplate::new(502)).await;

    let router = router_with(Arc::new(client(&server)));
    let response = get(router, "/api/trends").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(json_body(response).await["code"], "UPSTREAM_UNAVAILABLE");
}
