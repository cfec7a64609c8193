//! SMA (Simple Moving Average) of closing prices.
//!
//! SMA(n)[i] = mean(close[i-n+1..=i])
//! Warmup: first (n-1) bars are `None`. A zero period yields all `None`.

use crate::domain::indicator::mean;
use crate::domain::ohlcv::Bar;

pub fn calculate_sma(bars: &[Bar], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; bars.len()];
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    (0..closes.len())
        .map(|i| {
            if i + 1 < period {
                None
            } else {
                Some(mean(&closes[i + 1 - period..=i]))
            }
        })
        .collect()
}

/// SMA value at the last bar, if the series is long enough.
pub fn current_sma(bars: &[Bar], period: usize) -> Option<f64> {
    calculate_sma(bars, period).last().copied().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::SMA_PERIOD;
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
    fn sma_warmup_is_none() {
        let closes: Vec<f64> = (1..=5).map(f64::from).collect();
        let series = calculate_sma(&bars_with_closes(&closes), 3);
        assert_eq!(series.len(), 5);
        assert!(series[0].is_none());
        assert!(series[1].is_none());
        assert_relative_eq!(series[2].unwrap(), 2.0);
        assert_relative_eq!(series[3].unwrap(), 3.0);
        assert_relative_eq!(series[4].unwrap(), 4.0);
    }

    #[test]
    fn sma_exactly_twenty_bars_has_one_value() {
        let closes: Vec<f64> = (1..=20).map(f64::from).collect();
        let series = calculate_sma(&bars_with_closes(&closes), SMA_PERIOD);
        let present: Vec<f64> = series.iter().flatten().copied().collect();
        assert_eq!(present.len(), 1);
        assert_relative_eq!(present[0], 10.5);
    }

    #[test]
    fn current_sma_nineteen_bars_is_absent() {
        let closes: Vec<f64> = (1..=19).map(f64::from).collect();
        assert!(current_sma(&bars_with_closes(&closes), SMA_PERIOD).is_none());
    }

    #[test]
    fn current_sma_uses_trailing_window() {
        let closes: Vec<f64> = (1..=25).map(f64::from).collect();
        // mean(6..=25) = 15.5
        assert_relative_eq!(
            current_sma(&bars_with_closes(&closes), SMA_PERIOD).unwrap(),
            15.5
        );
    }

    #[test]
    fn sma_zero_period() {
        let series = calculate_sma(&bars_with_closes(&[1.0, 2.0]), 0);
        assert_eq!(series, vec![None, None]);
    }

    #[test]
    fn sma_empty() {
        assert!(calculate_sma(&[], SMA_PERIOD).is_empty());
        assert!(current_sma(&[], SMA_PERIOD).is_none());
    }
}
