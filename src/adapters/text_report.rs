//! Plain-text rendering of an analysis for the terminal.

use std::fmt::Write as _;

use crate::domain::analysis::AnalysisResult;
use crate::domain::indicator::{IndicatorType, RSI_PERIOD, SMA_PERIOD};

/// Two decimals, or "n/a" for NaN and infinite values.
pub fn format_value(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}", value)
    } else {
        "n/a".to_string()
    }
}

/// Human-readable report of one analysis.
pub fn format_analysis(symbol: &str, result: &AnalysisResult) -> String {
    let mut out = String::new();
    let sma = result
        .indicators
        .sma20
        .map_or_else(|| "n/a".to_string(), format_value);

    let _ = writeln!(out, "{} @ {}", symbol, format_value(result.current_price));
    let _ = writeln!(
        out,
        "Signal:      {} (confidence {})",
        result.signal, result.indicators.confidence
    );
    let _ = writeln!(
        out,
        "{:<12} {}",
        format!("{}:", IndicatorType::Vwap),
        format_value(result.indicators.vwap)
    );
    let _ = writeln!(
        out,
        "{:<12} {}",
        format!("{}:", IndicatorType::Sma(SMA_PERIOD)),
        sma
    );
    let _ = writeln!(
        out,
        "{:<12} {}",
        format!("{}:", IndicatorType::Rsi(RSI_PERIOD)),
        format_value(result.indicators.rsi)
    );

    out.push_str("Reasoning:\n");
    if result.reasoning.is_empty() {
        out.push_str("  (no rule fired)\n");
    }
    for reason in &result.reasoning {
        let _ = writeln!(out, "  - {}", reason);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::Indicators;
    use crate::domain::signal::Signal;

    #[test]
    fn format_value_handles_non_finite() {
        assert_eq!(format_value(1.005), "1.00");
        assert_eq!(format_value(161.5), "161.50");
        assert_eq!(format_value(f64::NAN), "n/a");
        assert_eq!(format_value(f64::INFINITY), "n/a");
    }

    #[test]
    fn report_layout() {
        let result = AnalysisResult {
            signal: Signal::Sell,
            reasoning: vec!["Price is trading below VWAP".to_string()],
            indicators: Indicators {
                sma20: Some(10.0),
                rsi: 75.5,
                vwap: 11.25,
                confidence: -2,
            },
            current_price: 9.5,
        };
        let text = format_analysis("IBM", &result);
        assert_eq!(
            text,
            "IBM @ 9.50\n\
             Signal:      SELL (confidence -2)\n\
             VWAP:        11.25\n\
             SMA(20):     10.00\n\
             RSI(14):     75.50\n\
             Reasoning:\n\
             \x20 - Price is trading below VWAP\n"
        );
    }
}
