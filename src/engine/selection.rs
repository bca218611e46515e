use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::indicators::compute_overlay;
use super::market::Market;
use crate::errors::AppError;
use crate::models::chart::{ChartView, MainSeries, Trend};
use crate::models::config::{ChartType, DashboardConfig};
use crate::models::indicator::IndicatorPoint;
use crate::models::instrument::Instrument;

/// What the user currently has selected. Single owner, mutated only by
/// discrete selection events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub active_id: String,
    pub chart_type: ChartType,
    /// Labels of overlays currently shown.
    pub enabled_indicators: BTreeSet<String>,
}

impl Selection {
    /// First instrument, configured chart type, every overlay on.
    pub fn new(market: &Market, config: &DashboardConfig) -> Self {
        Self {
            active_id: market.first().id.clone(),
            chart_type: config.default_chart_type,
            enabled_indicators: config.indicators.iter().map(|i| i.label.clone()).collect(),
        }
    }

    /// Unknown ids resolve to the first instrument here, so only the resolved
    /// id is ever stored.
    pub fn select(&mut self, market: &Market, id: &str) {
        let resolved = market.get_or_default(id);
        debug!("Selected instrument {}", resolved.id);
        self.active_id = resolved.id.clone();
    }

    pub fn set_chart_type(&mut self, chart_type: ChartType) {
        self.chart_type = chart_type;
    }

    /// Flip an overlay on or off. Returns whether it is now shown.
    pub fn toggle_indicator(
        &mut self,
        config: &DashboardConfig,
        label: &str,
    ) -> Result<bool, AppError> {
        if config.indicator(label).is_none() {
            return Err(AppError::InvalidIndicatorParams(format!(
                "unknown indicator: {}",
                label
            )));
        }
        if self.enabled_indicators.remove(label) {
            Ok(false)
        } else {
            self.enabled_indicators.insert(label.to_string());
            Ok(true)
        }
    }

    pub fn is_enabled(&self, label: &str) -> bool {
        self.enabled_indicators.contains(label)
    }

    pub fn active<'a>(&self, market: &'a Market) -> &'a Instrument {
        market.get_or_default(&self.active_id)
    }

    /// Assemble the chart payload for the active instrument. Overlays keep
    /// the order they are configured in.
    pub fn chart_view(&self, market: &Market, config: &DashboardConfig) -> ChartView {
        let inst = self.active(market);
        let main = match self.chart_type {
            ChartType::Candlestick => MainSeries::Candles(inst.series.clone()),
            ChartType::Area | ChartType::Line => MainSeries::Closes(
                inst.series
                    .iter()
                    .map(|b| IndicatorPoint {
                        time: b.time,
                        value: b.close,
                    })
                    .collect(),
            ),
        };
        let overlays = config
            .indicators
            .iter()
            .filter(|ind| self.is_enabled(&ind.label))
            .map(|ind| compute_overlay(ind, &inst.series))
            .collect();

        ChartView {
            instrument_id: inst.id.clone(),
            chart_type: self.chart_type,
            trend: Trend::from_change(inst.change_percent),
            main,
            overlays,
        }
    }
}
