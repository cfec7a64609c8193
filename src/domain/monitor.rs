//! Monitor settings and the latest refresh snapshot.
//!
//! MonitorConfig holds the `[monitor]` parameters. MonitorSnapshot is what
//! the dashboard shows: the last good bar series, its analysis, and the
//! outcome of the most recent refresh attempt.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

use crate::domain::analysis::{analyze, AnalysisResult};
use crate::domain::config_validation::validate_monitor_config;
use crate::domain::error::TickwatchError;
use crate::domain::ohlcv::Bar;
use crate::ports::config_port::ConfigPort;

pub const SUPPORTED_INTERVALS: [&str; 5] = ["1min", "5min", "15min", "30min", "60min"];
pub const DEFAULT_INTERVAL: &str = "5min";
pub const DEFAULT_REFRESH_SECS: i64 = 300;
pub const MAX_REFRESH_SECS: i64 = 86_400;

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub symbol: String,
    pub interval: String,
    pub refresh_interval: Duration,
}

impl MonitorConfig {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, TickwatchError> {
        validate_monitor_config(config)?;

        let symbol = config
            .get_string("monitor", "symbol")
            .map(|s| s.trim().to_uppercase())
            .ok_or_else(|| TickwatchError::ConfigMissing {
                section: "monitor".to_string(),
                key: "symbol".to_string(),
            })?;
        let interval = config
            .get_string("provider", "interval")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_INTERVAL.to_string());
        let refresh_secs = config.get_int("monitor", "refresh_secs", DEFAULT_REFRESH_SECS);

        Ok(Self {
            symbol,
            interval,
            refresh_interval: Duration::from_secs(refresh_secs.unsigned_abs()),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MonitorSnapshot {
    pub symbol: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_attempt_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub result: Option<AnalysisResult>,
    pub bars: Vec<Bar>,
}

impl MonitorSnapshot {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            updated_at: None,
            last_attempt_at: None,
            last_error: None,
            result: None,
            bars: Vec::new(),
        }
    }

    /// Replace the series and analyze it once. Clears any previous error.
    pub fn apply_success(&mut self, bars: Vec<Bar>, at: DateTime<Utc>) {
        self.result = analyze(&bars);
        self.bars = bars;
        self.updated_at = Some(at);
        self.last_attempt_at = Some(at);
        self.last_error = None;
    }

    /// Record a failed refresh, keeping the last good series and result.
    pub fn apply_failure(&mut self, err: &TickwatchError, at: DateTime<Utc>) {
        self.last_attempt_at = Some(at);
        self.last_error = Some(err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;
    use chrono::NaiveDate;

    fn bar(minute: u32, close: f64) -> Bar {
        Bar {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(10, minute, 0)
                .unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 500.0,
        }
    }

    #[test]
    fn from_config_applies_defaults() {
        let cfg = FileConfigAdapter::from_string("[monitor]\nsymbol = ibm\n").unwrap();
        let mc = MonitorConfig::from_config(&cfg).unwrap();
        assert_eq!(mc.symbol, "IBM");
        assert_eq!(mc.interval, "5min");
        assert_eq!(mc.refresh_interval, Duration::from_secs(300));
    }

    #[test]
    fn from_config_reads_values() {
        let cfg = FileConfigAdapter::from_string(
            "[provider]\ninterval = 15min\n[monitor]\nsymbol = MSFT\nrefresh_secs = 60\n",
        )
        .unwrap();
        let mc = MonitorConfig::from_config(&cfg).unwrap();
        assert_eq!(mc.interval, "15min");
        assert_eq!(mc.refresh_interval, Duration::from_secs(60));
    }

    #[test]
    fn from_config_rejects_invalid() {
        let cfg = FileConfigAdapter::from_string("[monitor]\nrefresh_secs = 60\n").unwrap();
        assert!(MonitorConfig::from_config(&cfg).is_err());
    }

    #[test]
    fn success_then_failure_keeps_last_result() {
        let mut snap = MonitorSnapshot::new("IBM");
        assert!(snap.result.is_none());

        let t0 = Utc::now();
        snap.apply_success(vec![bar(0, 10.0), bar(5, 11.0)], t0);
        assert!(snap.result.is_some());
        assert_eq!(snap.bars.len(), 2);
        assert_eq!(snap.updated_at, Some(t0));

        let t1 = t0 + chrono::Duration::seconds(300);
        snap.apply_failure(
            &TickwatchError::RateLimited {
                message: "slow down".into(),
            },
            t1,
        );
        assert!(snap.result.is_some());
        assert_eq!(snap.bars.len(), 2);
        assert_eq!(snap.updated_at, Some(t0));
        assert_eq!(snap.last_attempt_at, Some(t1));
        assert!(snap.last_error.as_deref().unwrap().contains("slow down"));

        snap.apply_success(vec![bar(0, 10.0)], t1);
        assert!(snap.last_error.is_none());
    }

    #[test]
    fn success_with_empty_series_has_no_result() {
        let mut snap = MonitorSnapshot::new("IBM");
        snap.apply_success(Vec::new(), Utc::now());
        assert!(snap.result.is_none());
        assert!(snap.last_error.is_none());
    }
}
