//! RSI (Relative Strength Index) over a fixed historical window.
//!
//! Uses the simple mean of the FIRST `period` close-to-close changes, not
//! a trailing window and not Wilder's smoothing:
//! - gains[i] = max(change[i], 0), losses[i] = max(-change[i], 0)
//! - avg_gain = mean(gains[..period]), avg_loss = mean(losses[..period])
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0: RSI = 100
//!
//! With fewer than `period + 1` bars the slices are shorter and are averaged
//! over their actual length; an empty slice averages to 0.

use crate::domain::indicator::mean;
use crate::domain::ohlcv::Bar;

pub fn calculate_rsi(bars: &[Bar], period: usize) -> f64 {
    let changes: Vec<f64> = bars.windows(2).map(|w| w[1].close - w[0].close).collect();

    let gains: Vec<f64> = changes
        .iter()
        .map(|&c| if c > 0.0 { c } else { 0.0 })
        .collect();
    let losses: Vec<f64> = changes
        .iter()
        .map(|&c| if c < 0.0 { -c } else { 0.0 })
        .collect();

    let window = period.min(changes.len());
    let avg_gain = mean(&gains[..window]);
    let avg_loss = mean(&losses[..window]);

    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::RSI_PERIOD;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate};

    fn bars_with_closes(closes: &[f64]) -> Vec<Bar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                timestamp: start + Duration::minutes(5 * i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000.0,
            })
            .collect()
    }

    #[test]
    fn rsi_all_gains_is_100() {
        let closes: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
        assert_relative_eq!(calculate_rsi(&bars_with_closes(&closes), RSI_PERIOD), 100.0);
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let closes: Vec<f64> = (0..15).map(|i| 100.0 - i as f64).collect();
        let rsi = calculate_rsi(&bars_with_closes(&closes), RSI_PERIOD);
        assert!(!rsi.is_nan());
        assert_relative_eq!(rsi, 0.0);
    }

    #[test]
    fn rsi_known_calculation() {
        let closes = [
            44.0, 44.25, 44.50, 43.75, 44.50, 44.25, 44.75, 45.25, 45.50, 45.25, 45.50, 46.0,
            46.25, 46.0, 46.50,
        ];
        // gains: 0.25+0.25+0.75+0.5+0.5+0.25+0.25+0.5+0.25+0.5 = 4.0
        // losses: 0.75+0.25+0.25+0.25 = 1.5
        let expected = 100.0 - 100.0 / (1.0 + 4.0 / 1.5);
        assert_relative_eq!(
            calculate_rsi(&bars_with_closes(&closes), RSI_PERIOD),
            expected,
            epsilon = 1e-9
        );
    }

    #[test]
    fn rsi_ignores_changes_after_first_window() {
        // First 14 changes are gains; everything after is a crash.
        let mut closes: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
        closes.extend([50.0, 10.0, 5.0]);
        assert_relative_eq!(calculate_rsi(&bars_with_closes(&closes), RSI_PERIOD), 100.0);
    }

    #[test]
    fn rsi_short_series_averages_available_changes() {
        // Two changes: +2, -1 -> avg_gain 1, avg_loss 0.5, rs 2
        let rsi = calculate_rsi(&bars_with_closes(&[10.0, 12.0, 11.0]), RSI_PERIOD);
        assert_relative_eq!(rsi, 100.0 - 100.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn rsi_single_bar_has_no_losses() {
        assert_relative_eq!(calculate_rsi(&bars_with_closes(&[10.0]), RSI_PERIOD), 100.0);
    }

    #[test]
    fn rsi_empty_bars() {
        assert_relative_eq!(calculate_rsi(&[], RSI_PERIOD), 100.0);
    }

    #[test]
    fn rsi_nan_close_does_not_propagate() {
        let mut closes: Vec<f64> = (0..15).map(|i| 100.0 - i as f64).collect();
        closes[3] = f64::NAN;
        let rsi = calculate_rsi(&bars_with_closes(&closes), RSI_PERIOD);
        assert!(rsi.is_finite());
    }
}
