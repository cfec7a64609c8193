//! OHLCV bar representation.
//!
//! A bar series is a plain `&[Bar]` sorted ascending by timestamp. The
//! indicator engine reads it and never keeps it past the call.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Timestamp layout used by the intraday provider and the CSV files.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Sort ascending by timestamp, keeping the last occurrence of a duplicate.
pub fn normalize_series(mut bars: Vec<Bar>) -> Vec<Bar> {
    bars.reverse();
    bars.sort_by_key(|b| b.timestamp);
    bars.dedup_by_key(|b| b.timestamp);
    bars
}

mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&ts.format(TIMESTAMP_FORMAT))
    }
}
