use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One point of an overlay line, aligned to a bar's date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub time: NaiveDate,
    pub value: f64,
}

/// Configuration for a moving-average overlay.
///
/// The label is display-only: an overlay titled "EMA 60" is still computed
/// as a simple moving average over `period` closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    pub label: String,
    pub period: usize,
    pub color: String,
}

impl IndicatorConfig {
    pub fn new(label: &str, period: usize, color: &str) -> Self {
        Self {
            label: label.to_string(),
            period,
            color: color.to_string(),
        }
    }
}

/// A computed overlay ready for a chart renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Overlay {
    pub label: String,
    pub color: String,
    pub points: Vec<IndicatorPoint>,
}
