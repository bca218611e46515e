use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::indicator::IndicatorConfig;
use super::instrument::Language;
use crate::errors::AppError;

/// How the main price series is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Candlestick,
    Area,
    Line,
}

impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Candlestick => "candlestick",
            ChartType::Area => "area",
            ChartType::Line => "line",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "candlestick" | "candle" => Ok(ChartType::Candlestick),
            "area" => Ok(ChartType::Area),
            "line" => Ok(ChartType::Line),
            _ => Err(format!("Unknown chart type: {}", s)),
        }
    }
}

/// Longest accepted generation window, roughly a century.
pub const MAX_HORIZON_DAYS: u32 = 36_500;

/// Parameters of the synthetic random walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Calendar days before "today" covered by the series (inclusive window).
    pub horizon_days: u32,
    /// Maximum absolute daily close-to-close move, as a fraction.
    pub volatility: f64,
    /// Maximum wick extension beyond the body, as a fraction.
    pub wick_range: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            horizon_days: 365,
            volatility: 0.02,
            wick_range: 0.01,
        }
    }
}

/// Dashboard-wide settings. Every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub generator: GeneratorConfig,
    pub indicators: Vec<IndicatorConfig>,
    pub default_chart_type: ChartType,
    pub language: Language,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            indicators: vec![
                IndicatorConfig::new("MA 20", 20, "#f59e0b"),
                IndicatorConfig::new("EMA 60", 60, "#8b5cf6"),
            ],
            default_chart_type: ChartType::Candlestick,
            language: Language::Ko,
        }
    }
}

impl DashboardConfig {
    /// Load from a JSON file, or return defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let config = match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p)
                    .map_err(|e| AppError::FileRead(format!("{}: {}", p.display(), e)))?;
                Self::from_json(&raw)?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        serde_json::from_str(raw).map_err(|e| AppError::InvalidConfig(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let g = &self.generator;
        if g.horizon_days == 0 || g.horizon_days > MAX_HORIZON_DAYS {
            return Err(AppError::InvalidConfig(format!(
                "horizon_days must be in 1..={}, got {}",
                MAX_HORIZON_DAYS, g.horizon_days
            )));
        }
        // A move of -100% or a full-size wick would take prices to zero or below.
        if !g.volatility.is_finite() || g.volatility <= 0.0 || g.volatility >= 1.0 {
            return Err(AppError::InvalidConfig(format!(
                "volatility must be in (0, 1), got {}",
                g.volatility
            )));
        }
        if !g.wick_range.is_finite() || g.wick_range < 0.0 || g.wick_range >= 1.0 {
            return Err(AppError::InvalidConfig(format!(
                "wick_range must be in [0, 1), got {}",
                g.wick_range
            )));
        }

        let mut labels = HashSet::new();
        for ind in &self.indicators {
            if ind.period == 0 {
                return Err(AppError::InvalidIndicatorParams(format!(
                    "{}: period must be at least 1",
                    ind.label
                )));
            }
            if !labels.insert(ind.label.as_str()) {
                return Err(AppError::InvalidConfig(format!(
                    "duplicate indicator label: {}",
                    ind.label
                )));
            }
        }
        Ok(())
    }

    pub fn indicator(&self, label: &str) -> Option<&IndicatorConfig> {
        self.indicators.iter().find(|i| i.label == label)
    }
}
