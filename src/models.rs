// Core data structures for trend queries and responses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Keyword used when the caller does not supply one
pub const DEFAULT_KEYWORD: &str = "bitcoin";

/// Timeframe used when the caller does not supply one
pub const DEFAULT_TIMEFRAME: &str = "now 7-d";

/// Date format used for response labels
pub const LABEL_FORMAT: &str = "%Y-%m-%d";

/// Raw query string parameters, both optional
#[derive(Debug, Clone, Default)]
pub struct TrendQueryParams {
    pub keyword: Option<String>,
    pub timeframe: Option<String>,
}

/// Collect from decoded query pairs. A repeated name keeps its first value
/// and unknown names are ignored.
impl FromIterator<(String, String)> for TrendQueryParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = Self::default();
        for (name, value) in pairs {
            let slot = match name.as_str() {
                "keyword" => &mut params.keyword,
                "timeframe" => &mut params.timeframe,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

impl TrendQueryParams {
    /// Fill in defaults for anything the caller left out.
    ///
    /// Present-but-empty values are kept as-is; only absent ones are defaulted.
    pub fn resolve(self) -> TrendQuery {
        TrendQuery {
            keyword: self.keyword.unwrap_or_else(|| DEFAULT_KEYWORD.to_string()),
            timeframe: self.timeframe.unwrap_or_else(|| DEFAULT_TIMEFRAME.to_string()),
        }
    }
}

/// Fully resolved query handed to a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendQuery {
    pub keyword: String,
    pub timeframe: String,
}

impl TrendQuery {
    pub fn new(keyword: impl Into<String>, timeframe: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            timeframe: timeframe.into(),
        }
    }
}

impl Default for TrendQuery {
    fn default() -> Self {
        TrendQueryParams::default().resolve()
    }
}

/// A single interest-over-time sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendPoint {
    pub timestamp: DateTime<Utc>,
    pub value: i64,
    /// Provider marks the trailing bucket as partial while it is still filling
    pub is_partial: bool,
}

impl TrendPoint {
    pub fn new(timestamp: DateTime<Utc>, value: i64) -> Self {
        Self {
            timestamp,
            value,
            is_partial: false,
        }
    }

    /// Label for this point, `YYYY-MM-DD` in UTC
    pub fn label(&self) -> String {
        self.timestamp.format(LABEL_FORMAT).to_string()
    }
}

/// Interest-over-time series for one keyword, in provider order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrendSeries {
    pub keyword: String,
    pub points: Vec<TrendPoint>,
}

impl TrendSeries {
    pub fn new(keyword: impl Into<String>, points: Vec<TrendPoint>) -> Self {
        Self {
            keyword: keyword.into(),
            points,
        }
    }

    /// Series with no data for the keyword
    pub fn empty(keyword: impl Into<String>) -> Self {
        Self::new(keyword, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// JSON body returned by `GET /api/trends`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendResponse {
    pub values: Vec<i64>,
    pub labels: Vec<String>,
}

impl From<&TrendSeries> for TrendResponse {
    fn from(series: &TrendSeries) -> Self {
        let (values, labels) = series
            .points
            .iter()
            .map(|p| (p.value, p.label()))
            .unzip();

        Self { values, labels }
    }
}

impl From<TrendSeries> for TrendResponse {
    fn from(series: TrendSeries) -> Self {
        Self::from(&series)
    }
}
