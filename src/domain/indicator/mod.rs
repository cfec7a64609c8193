//! Technical indicator implementations.
//!
//! Each indicator is a pure function over a bar slice:
//! - `vwap`: full-series volume-weighted average of closes
//! - `sma`: simple moving average of closes, `None` during warm-up
//! - `rsi`: relative strength index over the first `period` changes
//!
//! `IndicatorType` names an indicator and its parameters for display.

pub mod rsi;
pub mod sma;
pub mod vwap;

use std::fmt;

pub const SMA_PERIOD: usize = 20;
pub const RSI_PERIOD: usize = 14;

/// Arithmetic mean; an empty slice averages to 0.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Rsi(usize),
    Vwap,
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Vwap => write!(f, "VWAP"),
        }
    }
}
