//! Normalized report envelopes produced by the data access layer
//!
//! Every controller operation resolves to an envelope tagged with a
//! `status` discriminator, so consumers (snapshot files, HTTP handlers)
//! see one stable shape for both outcomes.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Date format the market data service expects
const DATE_FORMAT: &str = "%d.%m.%Y";

/// Historical stock data for one company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StockDataReport {
    Success {
        company: String,
        period: String,
        data: Value,
        /// Tabular payload recovered from the raw response, when its shape allows
        parsed_data: Option<Value>,
        timestamp: DateTime<Utc>,
    },
    Error {
        company: String,
        period: String,
        error: String,
        timestamp: DateTime<Utc>,
    },
}

impl StockDataReport {
    /// Whether this report carries data rather than an error
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Side-by-side lookup across several companies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ComparisonReport {
    Success {
        companies: Vec<String>,
        metric: Option<String>,
        /// Raw per-company responses, keyed in request order
        data: Map<String, Value>,
        /// Per-company metric values; `null` where extraction found nothing
        comparison: Option<Map<String, Value>>,
        timestamp: DateTime<Utc>,
    },
    Error {
        companies: Vec<String>,
        metric: Option<String>,
        error: String,
        timestamp: DateTime<Utc>,
    },
}

impl ComparisonReport {
    /// Whether this report carries data rather than an error
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Default query window: one year ago through today, service date format
pub fn default_period(today: NaiveDate) -> (String, String) {
    let start = today
        .checked_sub_days(Days::new(365))
        .unwrap_or(NaiveDate::from_ymd_opt(today.year() - 1, 1, 1).unwrap_or(today));
    (
        start.format(DATE_FORMAT).to_string(),
        today.format(DATE_FORMAT).to_string(),
    )
}

/// Pull a named metric out of a raw company response
///
/// The service wraps payloads as `{"messages": [{"item": "<json string>"}]}`;
/// the metric lives somewhere in one of those embedded documents. Absent or
/// malformed items simply yield `None` - a missing metric is an expected
/// shape, not an error.
pub fn extract_metric(data: &Value, metric: &str) -> Option<Value> {
    data.get("messages")?
        .as_array()?
        .iter()
        .filter_map(|message| message.get("item")?.as_str())
        .filter_map(|item| serde_json::from_str::<Value>(item).ok())
        .find_map(|parsed| parsed.get(metric).cloned())
}

/// Recover the tabular payload from an OHLCV response
///
/// The table rides in `messages[2].item`, itself a JSON document whose
/// `data[0]` entry is yet another JSON string holding the actual table.
/// Any deviation from that nesting yields `None`.
pub fn parse_table(response: &Value) -> Option<Value> {
    let item = response.get("messages")?.get(2)?.get("item")?.as_str()?;
    let payload: Value = serde_json::from_str(item).ok()?;
    let table = payload.get("data")?.get(0)?.as_str()?;
    serde_json::from_str(table).ok()
}
