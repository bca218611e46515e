use std::path::Path;

use tracing::info;

use crate::engine::indicators::try_compute_overlay;
use crate::errors::AppError;
use crate::models::chart::{ChartView, InstrumentHeader, Trend, WatchlistRow};
use crate::models::config::ChartType;
use crate::models::instrument::Instrument;
use crate::utils::export;
use crate::AppState;

// ── Watchlist ──

/// Sidebar rows in catalog order, with the active one flagged.
pub fn list_instruments(state: &AppState) -> Vec<WatchlistRow> {
    let active_id = &state.selection.active(&state.market).id;
    state
        .market
        .instruments()
        .iter()
        .map(|inst| WatchlistRow {
            id: inst.id.clone(),
            name: inst.display_name(state.config.language).to_string(),
            ticker: inst.ticker.clone(),
            current_price: inst.current_price,
            change_percent: inst.change_percent,
            active: &inst.id == active_id,
        })
        .collect()
}

/// Make `id` the active instrument. Unknown ids resolve to the first one.
pub fn select_instrument(state: &mut AppState, id: &str) -> InstrumentHeader {
    state.selection.select(&state.market, id);
    get_header(state)
}

// ── Header ──

pub fn get_header(state: &AppState) -> InstrumentHeader {
    let inst = state.selection.active(&state.market);
    header_for(inst, state)
}

fn header_for(inst: &Instrument, state: &AppState) -> InstrumentHeader {
    InstrumentHeader {
        id: inst.id.clone(),
        name: inst.display_name(state.config.language).to_string(),
        ticker: inst.ticker.clone(),
        current_price: inst.current_price,
        change_amount: inst.change_amount,
        change_percent: inst.change_percent,
        trend: Trend::from_change(inst.change_percent),
        market_cap: inst.market_cap,
        volume: inst.volume,
        price_to_earnings: inst.price_to_earnings,
        earnings_per_share: inst.earnings_per_share,
        performance: inst.performance.clone(),
    }
}

// ── Chart ──

pub fn set_chart_type(state: &mut AppState, chart_type: &str) -> Result<ChartType, AppError> {
    let parsed: ChartType = chart_type.parse().map_err(AppError::InvalidConfig)?;
    state.selection.set_chart_type(parsed);
    Ok(parsed)
}

/// Returns whether the overlay is shown after the toggle.
pub fn toggle_indicator(state: &mut AppState, label: &str) -> Result<bool, AppError> {
    state.selection.toggle_indicator(&state.config, label)
}

pub fn get_chart(state: &AppState) -> ChartView {
    state.selection.chart_view(&state.market, &state.config)
}

// ── Export ──

/// Write an instrument's bars, and optionally one overlay, as CSV.
/// Unlike selection, an explicit export of an unknown id is an error.
pub fn export_series(
    state: &AppState,
    id: &str,
    out: &Path,
    indicator: Option<(&str, &Path)>,
) -> Result<(), AppError> {
    let inst = state.market.require(id)?;
    export::write_series_csv(&inst.series, out)?;
    info!("Exported {} bars of {} to {}", inst.series.len(), inst.id, out.display());

    if let Some((label, overlay_out)) = indicator {
        let config = state.config.indicator(label).ok_or_else(|| {
            AppError::InvalidIndicatorParams(format!("unknown indicator: {}", label))
        })?;
        let overlay = try_compute_overlay(config, &inst.series)?;
        export::write_overlay_csv(&overlay, overlay_out)?;
        info!("Exported {} to {}", label, overlay_out.display());
    }
    Ok(())
}

pub fn export_snapshot(state: &AppState, out: &Path) -> Result<(), AppError> {
    export::write_snapshot_json(&state.market, out)?;
    info!("Snapshot written to {}", out.display());
    Ok(())
}
