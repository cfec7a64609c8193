#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tickwatch::domain::error::TickwatchError;
pub use tickwatch::domain::ohlcv::Bar;
use tickwatch::ports::data_port::DataPort;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<Bar>>,
    pub errors: HashMap<String, String>,
    pub calls: AtomicUsize,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<Bar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DataPort for MockDataPort {
    fn fetch_intraday(&self, symbol: &str) -> Result<Vec<Bar>, TickwatchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = self.errors.get(symbol) {
            return Err(TickwatchError::Network {
                reason: reason.clone(),
            });
        }
        match self.data.get(symbol) {
            Some(bars) => Ok(bars.clone()),
            None => Err(TickwatchError::NoData {
                symbol: symbol.to_string(),
            }),
        }
    }
}

pub fn session_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

pub fn make_bar(index: usize, close: f64, volume: f64) -> Bar {
    Bar {
        timestamp: session_start() + Duration::minutes(5 * index as i64),
        open: close,
        high: close + 0.5,
        low: close - 0.5,
        close,
        volume,
    }
}

/// Bars with the given closes, all at the same volume.
pub fn bars_from_closes(closes: &[f64], volume: f64) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| make_bar(i, close, volume))
        .collect()
}

/// Bars from (close, volume) pairs.
pub fn bars_from_pairs(pairs: &[(f64, f64)]) -> Vec<Bar> {
    pairs
        .iter()
        .enumerate()
        .map(|(i, &(close, volume))| make_bar(i, close, volume))
        .collect()
}

/// Linear trend: `count` closes starting at `start`, moving by `step`.
pub fn trend(count: usize, start: f64, step: f64) -> Vec<f64> {
    (0..count).map(|i| start + step * i as f64).collect()
}

/// Rows in the CSV layout the csv adapter reads.
pub fn bars_to_csv(bars: &[Bar]) -> String {
    let mut out = String::from("timestamp,open,high,low,close,volume\n");
    for bar in bars {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            bar.timestamp.format("%Y-%m-%d %H:%M:%S"),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume
        ));
    }
    out
}
