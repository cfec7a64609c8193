//! Market data access port trait.

use crate::domain::error::TickwatchError;
use crate::domain::ohlcv::Bar;

pub trait DataPort {
    /// Intraday bars for `symbol`, ascending by timestamp, no duplicates.
    fn fetch_intraday(&self, symbol: &str) -> Result<Vec<Bar>, TickwatchError>;
}
