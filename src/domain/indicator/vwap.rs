//! VWAP (Volume-Weighted Average Price).
//!
//! VWAP = sum(close * volume) / sum(volume) over every bar in the series.
//! No session reset and no rolling window. Zero total volume (or an empty
//! series) yields `f64::NAN`; callers must check `is_finite` before use.

use crate::domain::ohlcv::Bar;

pub fn calculate_vwap(bars: &[Bar]) -> f64 {
    let (weighted, volume) = bars.iter().fold((0.0, 0.0), |(pv, v), bar| {
        (pv + bar.close * bar.volume, v + bar.volume)
    });

    if volume == 0.0 {
        return f64::NAN;
    }
    weighted / volume
}
