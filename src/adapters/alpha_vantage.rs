//! Alpha Vantage intraday data adapter.
//!
//! Calls `TIME_SERIES_INTRADAY` and maps the JSON body to bars. The body is
//! checked in order for an `Error Message` (bad symbol or key), a `Note` or
//! `Information` field (free-tier call limit), then the
//! `Time Series (<interval>)` object.

use chrono::NaiveDateTime;
use reqwest::blocking::Client;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::domain::error::TickwatchError;
use crate::domain::monitor::DEFAULT_INTERVAL;
use crate::domain::ohlcv::{normalize_series, Bar, TIMESTAMP_FORMAT};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";
pub const API_KEY_ENV: &str = "ALPHAVANTAGE_API_KEY";
pub const DEFAULT_TIMEOUT_SECS: f64 = 10.0;
pub const MAX_TIMEOUT_SECS: f64 = 300.0;

pub struct AlphaVantageAdapter {
    client: Client,
    base_url: String,
    api_key: String,
    interval: String,
}

impl AlphaVantageAdapter {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        interval: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TickwatchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TickwatchError::Network {
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            interval: interval.into(),
        })
    }

    /// Build from `[provider]`; `ALPHAVANTAGE_API_KEY` overrides `api_key`.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, TickwatchError> {
        let api_key = resolve_api_key(std::env::var(API_KEY_ENV).ok(), config)?;
        let base_url = config
            .get_string("provider", "base_url")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let interval = config
            .get_string("provider", "interval")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_INTERVAL.to_string());

        let timeout_secs = config.get_double("provider", "timeout_secs", DEFAULT_TIMEOUT_SECS);
        let invalid_timeout = |reason: String| TickwatchError::ConfigInvalid {
            section: "provider".to_string(),
            key: "timeout_secs".to_string(),
            reason,
        };
        if !(timeout_secs > 0.0 && timeout_secs <= MAX_TIMEOUT_SECS) {
            return Err(invalid_timeout(format!(
                "timeout_secs must be in (0, {}]",
                MAX_TIMEOUT_SECS
            )));
        }
        let timeout = Duration::try_from_secs_f64(timeout_secs)
            .map_err(|e| invalid_timeout(e.to_string()))?;

        Self::new(api_key, base_url, interval, timeout)
    }
}

impl DataPort for AlphaVantageAdapter {
    fn fetch_intraday(&self, symbol: &str) -> Result<Vec<Bar>, TickwatchError> {
        debug!(symbol, interval = %self.interval, "requesting intraday series");

        let resp = self
            .client
            .get(format!("{}/query", self.base_url))
            .query(&[
                ("function", "TIME_SERIES_INTRADAY"),
                ("symbol", symbol),
                ("interval", self.interval.as_str()),
                ("outputsize", "compact"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .map_err(|e| TickwatchError::Network {
                reason: e.without_url().to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TickwatchError::Network {
                reason: format!("HTTP {}", status),
            });
        }

        let body = resp.text().map_err(|e| TickwatchError::Network {
            reason: e.without_url().to_string(),
        })?;

        match parse_intraday_response(&body, &self.interval) {
            Ok(bars) => {
                info!(symbol, bars = bars.len(), "fetched intraday series");
                Ok(bars)
            }
            Err(e) => {
                warn!(symbol, error = %e, "intraday request rejected");
                Err(e)
            }
        }
    }
}

fn resolve_api_key(
    env_value: Option<String>,
    config: &dyn ConfigPort,
) -> Result<String, TickwatchError> {
    env_value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| config.get_string("provider", "api_key"))
        .ok_or_else(|| TickwatchError::ConfigMissing {
            section: "provider".to_string(),
            key: "api_key".to_string(),
        })
}

/// Map an intraday response body to bars sorted ascending by timestamp.
pub fn parse_intraday_response(body: &str, interval: &str) -> Result<Vec<Bar>, TickwatchError> {
    let json: Value = serde_json::from_str(body).map_err(|e| TickwatchError::MalformedResponse {
        reason: format!("body is not JSON: {}", e),
    })?;

    if let Some(msg) = json.get("Error Message") {
        return Err(TickwatchError::Provider {
            message: text_of(msg),
        });
    }
    if let Some(msg) = json.get("Note").or_else(|| json.get("Information")) {
        return Err(TickwatchError::RateLimited {
            message: text_of(msg),
        });
    }

    let key = format!("Time Series ({})", interval);
    let series = json
        .get(&key)
        .and_then(Value::as_object)
        .ok_or_else(|| TickwatchError::MalformedResponse {
            reason: format!("missing '{}' object", key),
        })?;

    let bars = series
        .iter()
        .map(|(ts, entry)| parse_bar(ts, entry))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(normalize_series(bars))
}

fn parse_bar(ts: &str, entry: &Value) -> Result<Bar, TickwatchError> {
    let timestamp = NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).map_err(|_| {
        TickwatchError::MalformedResponse {
            reason: format!("invalid timestamp '{}'", ts),
        }
    })?;
    let fields = entry
        .as_object()
        .ok_or_else(|| TickwatchError::MalformedResponse {
            reason: format!("bar at {} is not an object", ts),
        })?;

    Ok(Bar {
        timestamp,
        open: numeric_field(fields, "1. open", ts)?,
        high: numeric_field(fields, "2. high", ts)?,
        low: numeric_field(fields, "3. low", ts)?,
        close: numeric_field(fields, "4. close", ts)?,
        volume: numeric_field(fields, "5. volume", ts)?,
    })
}

fn numeric_field(fields: &Map<String, Value>, name: &str, ts: &str) -> Result<f64, TickwatchError> {
    let value = fields.get(name);
    let parsed = match value {
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    };
    parsed.ok_or_else(|| TickwatchError::MalformedResponse {
        reason: format!("bar at {} has invalid '{}'", ts, name),
    })
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
