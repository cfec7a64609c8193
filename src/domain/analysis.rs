//! Indicator engine: one pure pass from a bar series to an analysis result.
//!
//! `analyze` returns `None` for an empty series. Otherwise every field is
//! populated; insufficient history shows up as an absent SMA, a degraded
//! RSI or a NaN VWAP, never as an error.

use serde::Serialize;

use crate::domain::indicator::rsi::calculate_rsi;
use crate::domain::indicator::sma::current_sma;
use crate::domain::indicator::vwap::calculate_vwap;
use crate::domain::indicator::{mean, RSI_PERIOD, SMA_PERIOD};
use crate::domain::ohlcv::Bar;
use crate::domain::signal::{evaluate, Signal, SignalInputs};

/// Indicator values at the last bar. `vwap` is NaN when total volume is
/// zero and serializes to `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Indicators {
    pub sma20: Option<f64>,
    pub rsi: f64,
    pub vwap: f64,
    pub confidence: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub signal: Signal,
    pub reasoning: Vec<String>,
    pub indicators: Indicators,
    pub current_price: f64,
}

pub fn analyze(bars: &[Bar]) -> Option<AnalysisResult> {
    let last = bars.last()?;

    let vwap = calculate_vwap(bars);
    let sma20 = current_sma(bars, SMA_PERIOD);
    let rsi = calculate_rsi(bars, RSI_PERIOD);

    let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();
    let inputs = SignalInputs {
        current_price: last.close,
        vwap,
        current_volume: last.volume,
        avg_volume: mean(&volumes),
        rsi,
        sma: sma20,
    };
    let evaluation = evaluate(&inputs);

    Some(AnalysisResult {
        signal: Signal::from_confidence(evaluation.confidence),
        reasoning: evaluation.reasoning,
        indicators: Indicators {
            sma20,
            rsi,
            vwap,
            confidence: evaluation.confidence,
        },
        current_price: last.close,
    })
}
