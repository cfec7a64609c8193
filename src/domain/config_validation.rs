//! Configuration validation.
//!
//! Validates all config fields before the monitor starts.

use crate::domain::error::TickwatchError;
use crate::domain::monitor::{DEFAULT_REFRESH_SECS, MAX_REFRESH_SECS, SUPPORTED_INTERVALS};
use crate::ports::config_port::ConfigPort;
use std::net::SocketAddr;

pub fn validate_monitor_config(config: &dyn ConfigPort) -> Result<(), TickwatchError> {
    validate_symbol(config)?;
    validate_refresh_secs(config)?;
    validate_interval(config)?;
    validate_listen(config)?;
    Ok(())
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<(), TickwatchError> {
    match config.get_string("monitor", "symbol") {
        Some(s) if !s.trim().is_empty() => {
            if s.trim().chars().any(char::is_whitespace) {
                return Err(TickwatchError::ConfigInvalid {
                    section: "monitor".to_string(),
                    key: "symbol".to_string(),
                    reason: "symbol must be a single ticker".to_string(),
                });
            }
            Ok(())
        }
        _ => Err(TickwatchError::ConfigMissing {
            section: "monitor".to_string(),
            key: "symbol".to_string(),
        }),
    }
}

fn validate_refresh_secs(config: &dyn ConfigPort) -> Result<(), TickwatchError> {
    let value = config.get_int("monitor", "refresh_secs", DEFAULT_REFRESH_SECS);
    if value <= 0 || value > MAX_REFRESH_SECS {
        return Err(TickwatchError::ConfigInvalid {
            section: "monitor".to_string(),
            key: "refresh_secs".to_string(),
            reason: format!("refresh_secs must be between 1 and {}", MAX_REFRESH_SECS),
        });
    }
    Ok(())
}

fn validate_interval(config: &dyn ConfigPort) -> Result<(), TickwatchError> {
    if let Some(interval) = config.get_string("provider", "interval") {
        if !SUPPORTED_INTERVALS.contains(&interval.trim()) {
            return Err(TickwatchError::ConfigInvalid {
                section: "provider".to_string(),
                key: "interval".to_string(),
                reason: format!(
                    "interval must be one of {}",
                    SUPPORTED_INTERVALS.join(", ")
                ),
            });
        }
    }
    Ok(())
}

fn validate_listen(config: &dyn ConfigPort) -> Result<(), TickwatchError> {
    if let Some(listen) = config.get_string("web", "listen") {
        listen
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| TickwatchError::ConfigInvalid {
                section: "web".to_string(),
                key: "listen".to_string(),
                reason: format!("'{}' is not a socket address", listen),
            })?;
    }
    Ok(())
}
