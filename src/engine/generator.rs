use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::models::config::GeneratorConfig;
use crate::models::price_bar::PriceBar;

/// Deterministic source of values in `[0, 1)` keyed by a real number.
pub trait NoiseSource {
    fn sample(&self, x: f64) -> f64;
}

/// `frac(sin(x) * 10000)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SineNoise;

impl NoiseSource for SineNoise {
    fn sample(&self, x: f64) -> f64 {
        seeded_random(x)
    }
}

pub fn seeded_random(x: f64) -> f64 {
    let v = x.sin() * 10_000.0;
    v - v.floor()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Generate the default one-year weekday series ending at `today`.
pub fn generate_series(base_price: f64, today: NaiveDate) -> Vec<PriceBar> {
    generate_series_with(base_price, today, &GeneratorConfig::default(), &SineNoise)
}

/// Seeded OHLC random walk over `[today - horizon_days, today]`, weekends skipped.
///
/// The seed is the base price itself. Each bar opens at the previous rounded
/// close; all four prices are rounded to whole units before the walk advances.
/// Carrying the rounded close (not the raw one) means paths drift from a walk
/// that rounds only for display, so values are not bit-equal to such a walk.
/// A non-positive or non-finite base price produces an empty series.
pub fn generate_series_with<N: NoiseSource>(
    base_price: f64,
    today: NaiveDate,
    config: &GeneratorConfig,
    noise: &N,
) -> Vec<PriceBar> {
    if !base_price.is_finite() || base_price <= 0.0 {
        return Vec::new();
    }

    let horizon = config.horizon_days as i64;
    let seed = base_price;
    let volatility = config.volatility;
    let mut running_price = base_price;
    let mut bars = Vec::with_capacity(horizon as usize * 5 / 7 + 2);

    for i in (0..=horizon).rev() {
        let Some(date) = today.checked_sub_signed(Duration::days(i)) else {
            continue;
        };
        if is_weekend(date) {
            continue;
        }

        let offset = i as f64;
        let r1 = noise.sample(seed + offset);
        let r2 = noise.sample(seed + offset * 2.0);
        let r3 = noise.sample(seed + offset * 3.0);

        let change_percent = r1 * volatility * 2.0 - volatility;
        let open = running_price;
        let close = open * (1.0 + change_percent);
        let high = open.max(close) * (1.0 + r2 * config.wick_range);
        let low = open.min(close) * (1.0 - r3 * config.wick_range);

        let bar = PriceBar {
            time: date,
            open: open.round(),
            high: high.round(),
            low: low.round(),
            close: close.round(),
        };
        running_price = bar.close;
        bars.push(bar);
    }

    bars
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekdays_between(start: NaiveDate, end: NaiveDate) -> usize {
        let mut count = 0;
        let mut d = start;
        while d <= end {
            let wd = d.weekday().num_days_from_monday();
            if wd < 5 {
                count += 1;
            }
            d = d.succ_opt().unwrap();
        }
        count
    }

    struct Constant(f64);

    impl NoiseSource for Constant {
        fn sample(&self, _x: f64) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_seeded_random_range_and_determinism() {
        for k in 0..1000 {
            let x = 75_000.0 + k as f64 * 1.7;
            let v = seeded_random(x);
            assert!((0.0..1.0).contains(&v), "sample {} out of range for {}", v, x);
            assert_eq!(v.to_bits(), seeded_random(x).to_bits());
        }
    }

    #[test]
    fn test_series_skips_weekends_and_is_ordered() {
        let bars = generate_series(75_000.0, date(2024, 6, 14));
        assert!(!bars.is_empty());
        assert!(bars.iter().all(|b| !is_weekend(b.time)));
        for w in bars.windows(2) {
            assert!(w[0].time < w[1].time, "{} !< {}", w[0].time, w[1].time);
        }
    }

    #[test]
    fn test_series_length_matches_weekday_count() {
        for today in [date(2024, 6, 14), date(2024, 6, 15), date(2023, 1, 1), date(2026, 10, 16)] {
            let bars = generate_series(140_000.0, today);
            let expected = weekdays_between(today - Duration::days(365), today);
            assert_eq!(bars.len(), expected, "today = {}", today);
        }
    }

    #[test]
    fn test_series_ends_at_today_on_weekday() {
        let today = date(2024, 6, 14); // Friday
        let bars = generate_series(55_000.0, today);
        assert_eq!(bars.last().unwrap().time, today);

        let saturday = date(2024, 6, 15);
        let bars = generate_series(55_000.0, saturday);
        assert_eq!(bars.last().unwrap().time, today);
    }

    #[test]
    fn test_series_is_deterministic() {
        let today = date(2025, 2, 3);
        let a = generate_series(400_000.0, today);
        let b = generate_series(400_000.0, today);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.time, y.time);
            assert_eq!(x.open.to_bits(), y.open.to_bits());
            assert_eq!(x.high.to_bits(), y.high.to_bits());
            assert_eq!(x.low.to_bits(), y.low.to_bits());
            assert_eq!(x.close.to_bits(), y.close.to_bits());
        }
    }

    #[test]
    fn test_different_bases_give_different_paths() {
        let today = date(2025, 2, 3);
        let a = generate_series(75_000.0, today);
        let b = generate_series(75_001.0, today);
        let ra: Vec<f64> = a.iter().map(|x| x.close / 75_000.0).collect();
        let rb: Vec<f64> = b.iter().map(|x| x.close / 75_001.0).collect();
        assert_ne!(ra, rb);
    }

    #[test]
    fn test_wicks_enclose_body_and_prices_are_whole() {
        for base in [55_000.0, 75_000.0, 800_000.0] {
            for bar in generate_series(base, date(2024, 11, 20)) {
                assert!(bar.is_consistent(), "{:?}", bar);
                for p in [bar.open, bar.high, bar.low, bar.close] {
                    assert_eq!(p, p.round());
                    assert!(p > 0.0);
                }
            }
        }
    }

    #[test]
    fn test_walk_carries_rounded_close_forward() {
        let bars = generate_series(250_000.0, date(2024, 11, 20));
        assert_eq!(bars[0].open, 250_000.0);
        for w in bars.windows(2) {
            assert_eq!(w[1].open, w[0].close);
        }
    }

    #[test]
    fn test_daily_move_bounded_by_volatility() {
        let bars = generate_series(800_000.0, date(2024, 11, 20));
        for b in &bars {
            let move_pct = (b.close - b.open).abs() / b.open;
            // One unit of rounding slack on top of the 2% band.
            assert!(move_pct <= 0.02 + 1.0 / b.open, "move {} on {}", move_pct, b.time);
        }
    }

    #[test]
    fn test_injected_noise_midpoint_is_flat() {
        let config = GeneratorConfig::default();
        let bars = generate_series_with(1_000.0, date(2024, 6, 14), &config, &Constant(0.5));
        for b in &bars {
            assert_eq!(b.open, 1_000.0);
            assert_eq!(b.close, 1_000.0);
            assert_eq!(b.high, 1_005.0);
            assert_eq!(b.low, 995.0);
        }
    }

    #[test]
    fn test_custom_horizon() {
        let config = GeneratorConfig {
            horizon_days: 6,
            ..GeneratorConfig::default()
        };
        // 2024-06-08 (Sat) .. 2024-06-14 (Fri): five weekdays
        let bars = generate_series_with(1_000.0, date(2024, 6, 14), &config, &SineNoise);
        assert_eq!(bars.len(), 5);
        assert_eq!(bars[0].time, date(2024, 6, 10));
    }

    #[test]
    fn test_invalid_base_price_yields_empty() {
        let today = date(2024, 6, 14);
        assert!(generate_series(0.0, today).is_empty());
        assert!(generate_series(-5.0, today).is_empty());
        assert!(generate_series(f64::NAN, today).is_empty());
    }
}
