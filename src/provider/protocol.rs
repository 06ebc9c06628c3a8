//! Google Trends web protocol types
//!
//! The explore endpoint returns a list of widgets, each carrying a signed
//! `token` and an opaque `request` object. The `TIMESERIES` widget is
//! replayed against the multiline endpoint to get interest-over-time data.
//! Every JSON body is prefixed with the anti-XSSI guard `)]}'`.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::models::{TrendPoint, TrendQuery, TrendSeries};

use super::error::{ProviderError, ProviderResult};

/// Widget id for interest-over-time data
pub const TIMESERIES_WIDGET: &str = "TIMESERIES";

const XSSI_GUARD: &str = ")]}'";

/// Strip the anti-XSSI guard and any trailing comma before the JSON payload
pub fn strip_guard(body: &str) -> &str {
    let body = body.trim_start();
    match body.strip_prefix(XSSI_GUARD) {
        Some(rest) => rest.trim_start_matches(',').trim_start(),
        None => body,
    }
}

/// Decode a guarded JSON body
pub fn decode_guarded<T: for<'de> Deserialize<'de>>(body: &str) -> ProviderResult<T> {
    Ok(serde_json::from_str(strip_guard(body))?)
}

// ============================================================================
// Explore
// ============================================================================

/// `req` parameter of the explore call
#[derive(Debug, Serialize)]
pub struct ExploreRequest<'a> {
    #[serde(rename = "comparisonItem")]
    pub comparison_item: Vec<ComparisonItem<'a>>,
    pub category: u32,
    pub property: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ComparisonItem<'a> {
    pub keyword: &'a str,
    pub time: &'a str,
    pub geo: &'a str,
}

impl<'a> ExploreRequest<'a> {
    /// Single-keyword explore request
    pub fn single(query: &'a TrendQuery, geo: &'a str, category: u32, property: &'a str) -> Self {
        Self {
            comparison_item: vec![ComparisonItem {
                keyword: &query.keyword,
                time: &query.timeframe,
                geo,
            }],
            category,
            property,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExploreResponse {
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

/// Explore widget. `request` is signed together with `token`, so it is
/// kept as the exact text Trends sent and replayed byte for byte.
#[derive(Debug, Clone, Deserialize)]
pub struct Widget {
    pub id: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub request: Option<Box<RawValue>>,
}

impl ExploreResponse {
    /// First widget with the given id
    pub fn widget(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }
}

impl Widget {
    /// Raw `request` JSON, as received
    pub fn raw_request(&self) -> ProviderResult<&str> {
        self.request
            .as_deref()
            .map(RawValue::get)
            .ok_or_else(|| ProviderError::Decode(format!("{} widget has no request", self.id)))
    }
}

// ============================================================================
// Multiline (interest over time)
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct MultilineResponse {
    pub default: MultilineData,
}

#[derive(Debug, Default, Deserialize)]
pub struct MultilineData {
    #[serde(rename = "timelineData", default)]
    pub timeline_data: Vec<TimelineEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TimelineEntry {
    /// Unix seconds, sent as a string
    pub time: String,
    #[serde(default)]
    pub value: Vec<i64>,
    #[serde(rename = "isPartial", default)]
    pub is_partial: bool,
}

impl TimelineEntry {
    fn to_point(&self) -> ProviderResult<TrendPoint> {
        let secs: i64 = self
            .time
            .trim()
            .parse()
            .map_err(|_| ProviderError::Decode(format!("invalid timestamp: {}", self.time)))?;
        let timestamp = DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| ProviderError::Decode(format!("timestamp out of range: {secs}")))?;
        // single keyword request, so the first column is ours
        let value = self
            .value
            .first()
            .copied()
            .ok_or_else(|| ProviderError::Decode(format!("no value at {}", self.time)))?;

        Ok(TrendPoint {
            timestamp,
            value,
            is_partial: self.is_partial,
        })
    }
}

impl MultilineResponse {
    /// Convert into a series for `keyword`, keeping provider order
    pub fn into_series(self, keyword: &str) -> ProviderResult<TrendSeries> {
        let points = self
            .default
            .timeline_data
            .iter()
            .map(TimelineEntry::to_point)
            .collect::<ProviderResult<Vec<_>>>()?;

        Ok(TrendSeries::new(keyword, points))
    }
}
