use std::collections::BTreeMap;

use rand::Rng;

use crate::models::instrument::PerformanceWindow;
use crate::models::price_bar::PriceBar;

/// Latest move derived from the last two closes of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeSummary {
    pub current_price: f64,
    pub previous_close: f64,
    pub change_amount: f64,
    pub change_percent: f64,
}

impl ChangeSummary {
    /// Empty series reports zeros; a single bar reports no change.
    pub fn from_series(bars: &[PriceBar]) -> Self {
        let current_price = bars.last().map(|b| b.close).unwrap_or(0.0);
        let previous_close = if bars.len() >= 2 {
            bars[bars.len() - 2].close
        } else {
            current_price
        };
        Self::from_closes(previous_close, current_price)
    }

    pub fn from_closes(previous_close: f64, current_price: f64) -> Self {
        let change_amount = current_price - previous_close;
        let change_percent = if previous_close != 0.0 {
            change_amount / previous_close * 100.0
        } else {
            0.0
        };
        Self {
            current_price,
            previous_close,
            change_amount,
            change_percent,
        }
    }
}

/// Display-only figures with no tie to the generated series beyond the current price.
#[derive(Debug, Clone, PartialEq)]
pub struct DecorativeMetrics {
    pub shares_outstanding: f64,
    pub market_cap: f64,
    pub volume: u64,
    pub price_to_earnings: f64,
    pub earnings_per_share: f64,
    pub performance: BTreeMap<PerformanceWindow, f64>,
}

impl DecorativeMetrics {
    pub fn draw<R: Rng>(current_price: f64, rng: &mut R) -> Self {
        let shares_outstanding = rng.gen_range(50_000_000.0..200_000_000.0);
        let volume = rng.gen_range(500_000u64..1_500_000);
        let price_to_earnings = rng.gen_range(8.0..28.0);

        let performance = PerformanceWindow::ALL
            .iter()
            .map(|w| {
                let spread = w.spread_pct();
                (*w, rng.gen_range(-spread..spread))
            })
            .collect();

        Self {
            shares_outstanding,
            market_cap: current_price * shares_outstanding,
            volume,
            price_to_earnings,
            earnings_per_share: current_price / price_to_earnings,
            performance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bars(closes: &[f64]) -> Vec<PriceBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PriceBar {
                time: start + chrono::Duration::days(i as i64),
                open: c,
                high: c,
                low: c,
                close: c,
            })
            .collect()
    }

    #[test]
    fn test_change_from_last_two_closes() {
        let s = ChangeSummary::from_series(&bars(&[90.0, 100.0, 110.0]));
        assert_eq!(s.current_price, 110.0);
        assert_eq!(s.previous_close, 100.0);
        assert_eq!(s.change_amount, 10.0);
        assert!((s.change_percent - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_change() {
        let s = ChangeSummary::from_series(&bars(&[200.0, 150.0]));
        assert_eq!(s.change_amount, -50.0);
        assert!((s.change_percent + 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_series_report_zero_change() {
        let empty = ChangeSummary::from_series(&[]);
        assert_eq!(empty.current_price, 0.0);
        assert_eq!(empty.change_percent, 0.0);

        let single = ChangeSummary::from_series(&bars(&[42.0]));
        assert_eq!(single.current_price, 42.0);
        assert_eq!(single.change_amount, 0.0);
        assert_eq!(single.change_percent, 0.0);

        let zero_prev = ChangeSummary::from_series(&bars(&[0.0, 5.0]));
        assert_eq!(zero_prev.change_amount, 5.0);
        assert_eq!(zero_prev.change_percent, 0.0);
        assert!(!zero_prev.change_percent.is_nan());
    }

    #[test]
    fn test_decorative_metrics_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let m = DecorativeMetrics::draw(75_000.0, &mut rng);
            assert!((50_000_000.0..200_000_000.0).contains(&m.shares_outstanding));
            assert!((m.market_cap - 75_000.0 * m.shares_outstanding).abs() < 1e-3);
            assert!((500_000..1_500_000).contains(&m.volume));
            assert!((8.0..28.0).contains(&m.price_to_earnings));
            assert!((m.earnings_per_share * m.price_to_earnings - 75_000.0).abs() < 1e-6);
            assert_eq!(m.performance.len(), 6);
            for (w, v) in &m.performance {
                assert!(v.abs() <= w.spread_pct(), "{} = {}", w, v);
            }
        }
    }

    #[test]
    fn test_decorative_metrics_reproducible_with_seeded_rng() {
        let a = DecorativeMetrics::draw(1_000.0, &mut StdRng::seed_from_u64(42));
        let b = DecorativeMetrics::draw(1_000.0, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
