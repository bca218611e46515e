use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::config::ChartType;
use super::indicator::{IndicatorPoint, Overlay};
use super::instrument::PerformanceWindow;
use super::price_bar::PriceBar;

/// Direction of the latest move. Zero change counts as up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn from_change(change_percent: f64) -> Self {
        if change_percent >= 0.0 {
            Trend::Up
        } else {
            Trend::Down
        }
    }
}

/// Main series payload, shaped by the active chart type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum MainSeries {
    Candles(Vec<PriceBar>),
    Closes(Vec<IndicatorPoint>),
}

impl MainSeries {
    pub fn len(&self) -> usize {
        match self {
            MainSeries::Candles(bars) => bars.len(),
            MainSeries::Closes(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything a chart renderer needs to draw the active instrument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartView {
    pub instrument_id: String,
    pub chart_type: ChartType,
    pub trend: Trend,
    pub main: MainSeries,
    pub overlays: Vec<Overlay>,
}

/// One sidebar row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistRow {
    pub id: String,
    pub name: String,
    pub ticker: String,
    pub current_price: f64,
    pub change_percent: f64,
    pub active: bool,
}

/// Summary shown above the chart for the active instrument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentHeader {
    pub id: String,
    pub name: String,
    pub ticker: String,
    pub current_price: f64,
    pub change_amount: f64,
    pub change_percent: f64,
    pub trend: Trend,
    pub market_cap: f64,
    pub volume: u64,
    pub price_to_earnings: f64,
    pub earnings_per_share: f64,
    pub performance: BTreeMap<PerformanceWindow, f64>,
}
