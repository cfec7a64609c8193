//! CSV file data adapter.
//!
//! Offline bar source. Each symbol lives in `<base_path>/<SYMBOL>.csv` with
//! a header row and the columns `timestamp,open,high,low,close,volume`.
//! Timestamps are `YYYY-MM-DD HH:MM:SS`; a bare `YYYY-MM-DD` is read as
//! midnight.

use crate::domain::error::TickwatchError;
use crate::domain::ohlcv::{normalize_series, Bar, TIMESTAMP_FORMAT};
use crate::ports::data_port::DataPort;
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    /// Read and normalize every bar in a single CSV file.
    pub fn read_file(path: &Path) -> Result<Vec<Bar>, TickwatchError> {
        let content = fs::read_to_string(path).map_err(|e| {
            std::io::Error::new(e.kind(), format!("failed to read {}: {}", path.display(), e))
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for (row, result) in rdr.records().enumerate() {
            let line = row + 2;
            let record = result.map_err(|e| TickwatchError::Data {
                reason: format!("CSV parse error on line {}: {}", line, e),
            })?;

            let ts_str = field(&record, 0, "timestamp", line)?;
            let timestamp = parse_timestamp(ts_str).ok_or_else(|| TickwatchError::Data {
                reason: format!("invalid timestamp '{}' on line {}", ts_str, line),
            })?;

            bars.push(Bar {
                timestamp,
                open: number(&record, 1, "open", line)?,
                high: number(&record, 2, "high", line)?,
                low: number(&record, 3, "low", line)?,
                close: number(&record, 4, "close", line)?,
                volume: number(&record, 5, "volume", line)?,
            });
        }

        Ok(normalize_series(bars))
    }
}

impl DataPort for CsvAdapter {
    fn fetch_intraday(&self, symbol: &str) -> Result<Vec<Bar>, TickwatchError> {
        let path = self.csv_path(symbol);
        if !path.exists() {
            return Err(TickwatchError::NoData {
                symbol: symbol.to_string(),
            });
        }
        Self::read_file(&path)
    }
}

fn field<'r>(
    record: &'r csv::StringRecord,
    index: usize,
    name: &str,
    line: usize,
) -> Result<&'r str, TickwatchError> {
    record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| TickwatchError::Data {
            reason: format!("missing {} column on line {}", name, line),
        })
}

fn number(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    line: usize,
) -> Result<f64, TickwatchError> {
    let raw = field(record, index, name, line)?;
    raw.parse().map_err(|e| TickwatchError::Data {
        reason: format!("invalid {} value '{}' on line {}: {}", name, raw, line, e),
    })
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
