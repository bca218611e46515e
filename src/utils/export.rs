use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::engine::market::Market;
use crate::errors::AppError;
use crate::models::indicator::Overlay;
use crate::models::instrument::Instrument;
use crate::models::price_bar::PriceBar;

/// Write OHLC bars to a CSV file.
pub fn write_series_csv(bars: &[PriceBar], path: &Path) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::FileWrite(format!("Cannot create CSV: {}", e)))?;

    wtr.write_record(["time", "open", "high", "low", "close"])?;
    for b in bars {
        wtr.write_record([
            b.time.format("%Y-%m-%d").to_string(),
            format!("{:.0}", b.open),
            format!("{:.0}", b.high),
            format!("{:.0}", b.low),
            format!("{:.0}", b.close),
        ])?;
    }

    wtr.flush().map_err(|e| AppError::FileWrite(e.to_string()))?;
    Ok(())
}

/// Write a moving-average overlay as `time,<label>` rows.
pub fn write_overlay_csv(overlay: &Overlay, path: &Path) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::FileWrite(format!("Cannot create CSV: {}", e)))?;

    wtr.write_record(["time", overlay.label.as_str()])?;
    for p in &overlay.points {
        wtr.write_record([p.time.format("%Y-%m-%d").to_string(), format!("{:.4}", p.value)])?;
    }

    wtr.flush().map_err(|e| AppError::FileWrite(e.to_string()))?;
    Ok(())
}

#[derive(Serialize)]
struct MarketSnapshot<'a> {
    as_of: NaiveDate,
    instruments: &'a [Instrument],
}

/// Dump the whole generated market as pretty JSON.
pub fn write_snapshot_json(market: &Market, path: &Path) -> Result<(), AppError> {
    let snapshot = MarketSnapshot {
        as_of: market.as_of(),
        instruments: market.instruments(),
    };
    let json = serde_json::to_string_pretty(&snapshot)?;
    let mut file = std::fs::File::create(path)
        .map_err(|e| AppError::FileWrite(format!("{}: {}", path.display(), e)))?;
    file.write_all(json.as_bytes())
        .map_err(|e| AppError::FileWrite(e.to_string()))?;
    Ok(())
}
