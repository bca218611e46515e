use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single daily OHLC bar. `time` serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub time: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl PriceBar {
    /// Whether the bar's wicks enclose its body.
    pub fn is_consistent(&self) -> bool {
        self.high >= self.open.max(self.close) && self.low <= self.open.min(self.close)
    }
}
