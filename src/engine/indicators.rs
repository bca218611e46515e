use crate::errors::AppError;
use crate::models::indicator::{IndicatorConfig, IndicatorPoint, Overlay};
use crate::models::price_bar::PriceBar;

// ── SMA ──

/// Simple Moving Average. First `period-1` values are NaN.
pub fn sma(data: &[f64], period: usize) -> Vec<f64> {
    let len = data.len();
    let mut result = vec![f64::NAN; len];
    if period == 0 || len < period {
        return result;
    }
    let mut sum: f64 = data[..period].iter().sum();
    result[period - 1] = sum / period as f64;
    for i in period..len {
        sum += data[i] - data[i - period];
        result[i] = sum / period as f64;
    }
    result
}

/// SMA of closes aligned to the tail of `bars`: `len - period + 1` points,
/// each stamped with the date of the bar that closes its window.
/// Empty when `period` is zero or exceeds the series length.
pub fn compute_sma(bars: &[PriceBar], period: usize) -> Vec<IndicatorPoint> {
    if period == 0 || bars.len() < period {
        return Vec::new();
    }
    let close: Vec<f64> = bars.iter().map(|b| b.close).collect();
    sma(&close, period)
        .into_iter()
        .zip(bars)
        .skip(period - 1)
        .map(|(value, bar)| IndicatorPoint {
            time: bar.time,
            value,
        })
        .collect()
}

/// Overlay for a chart renderer. Too-short series give an empty line.
pub fn compute_overlay(config: &IndicatorConfig, bars: &[PriceBar]) -> Overlay {
    Overlay {
        label: config.label.clone(),
        color: config.color.clone(),
        points: compute_sma(bars, config.period),
    }
}

/// Like [`compute_overlay`], but reports a short series instead of returning nothing.
pub fn try_compute_overlay(
    config: &IndicatorConfig,
    bars: &[PriceBar],
) -> Result<Overlay, AppError> {
    if config.period == 0 {
        return Err(AppError::InvalidIndicatorParams(format!(
            "{}: period must be at least 1",
            config.label
        )));
    }
    check_data_len(bars.len(), config.period)?;
    Ok(compute_overlay(config, bars))
}

fn check_data_len(available: usize, needed: usize) -> Result<(), AppError> {
    if available < needed {
        return Err(AppError::InsufficientData { needed, available });
    }
    Ok(())
}
