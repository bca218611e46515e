use chrono::NaiveDate;
use rand::Rng;
use tracing::{debug, info, warn};

use super::generator::{generate_series_with, SineNoise};
use super::metrics::{ChangeSummary, DecorativeMetrics};
use crate::errors::AppError;
use crate::models::config::GeneratorConfig;
use crate::models::instrument::{Instrument, InstrumentSpec};

/// Generate one instrument: seeded series, derived change, decorative figures.
pub fn build_instrument<R: Rng>(
    spec: &InstrumentSpec,
    today: NaiveDate,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Instrument {
    let series = generate_series_with(spec.base_price, today, config, &SineNoise);
    let change = ChangeSummary::from_series(&series);
    let extra = DecorativeMetrics::draw(change.current_price, rng);

    debug!(
        "Generated {}: {} bars, close {}, change {:.2}%",
        spec.ticker,
        series.len(),
        change.current_price,
        change.change_percent
    );

    Instrument {
        id: spec.ticker.clone(),
        name_ko: spec.name_ko.clone(),
        name_en: spec.name_en.clone(),
        ticker: spec.ticker.clone(),
        current_price: change.current_price,
        change_percent: change.change_percent,
        change_amount: change.change_amount,
        series,
        market_cap: extra.market_cap,
        volume: extra.volume,
        price_to_earnings: extra.price_to_earnings,
        earnings_per_share: extra.earnings_per_share,
        performance: extra.performance,
    }
}

/// The session's instrument list. Built once, never mutated, shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Market {
    as_of: NaiveDate,
    instruments: Vec<Instrument>,
}

impl Market {
    pub fn generate<R: Rng>(
        catalog: &[InstrumentSpec],
        today: NaiveDate,
        config: &GeneratorConfig,
        rng: &mut R,
    ) -> Result<Self, AppError> {
        let instruments = catalog
            .iter()
            .map(|spec| build_instrument(spec, today, config, &mut *rng))
            .collect();
        let market = Self::from_instruments(today, instruments)?;
        info!(
            "Market generated: {} instruments as of {}",
            market.instruments.len(),
            today
        );
        Ok(market)
    }

    pub fn from_instruments(
        as_of: NaiveDate,
        instruments: Vec<Instrument>,
    ) -> Result<Self, AppError> {
        if instruments.is_empty() {
            return Err(AppError::InvalidConfig("instrument catalog is empty".into()));
        }
        for (i, inst) in instruments.iter().enumerate() {
            if instruments[..i].iter().any(|other| other.id == inst.id) {
                return Err(AppError::InvalidConfig(format!(
                    "duplicate instrument id: {}",
                    inst.id
                )));
            }
        }
        Ok(Self { as_of, instruments })
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn first(&self) -> &Instrument {
        &self.instruments[0]
    }

    pub fn find(&self, id: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&Instrument, AppError> {
        self.find(id)
            .ok_or_else(|| AppError::InstrumentNotFound(id.to_string()))
    }

    /// Unknown ids fall back to the first instrument.
    pub fn get_or_default(&self, id: &str) -> &Instrument {
        match self.find(id) {
            Some(inst) => inst,
            None => {
                warn!("Unknown instrument {}, falling back to {}", id, self.first().id);
                self.first()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::generator::generate_series;
    use crate::models::instrument::default_catalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
    }

    fn market() -> Market {
        let mut rng = StdRng::seed_from_u64(1);
        Market::generate(&default_catalog(), today(), &GeneratorConfig::default(), &mut rng)
            .unwrap()
    }

    #[test]
    fn test_build_instrument_derives_price_fields() {
        let spec = InstrumentSpec::new("카카오", "Kakao", "035720.KS", 55_000.0);
        let mut rng = StdRng::seed_from_u64(3);
        let inst = build_instrument(&spec, today(), &GeneratorConfig::default(), &mut rng);

        assert_eq!(inst.id, "035720.KS");
        assert_eq!(inst.series, generate_series(55_000.0, today()));

        let n = inst.series.len();
        let last = inst.series[n - 1].close;
        let prev = inst.series[n - 2].close;
        assert_eq!(inst.current_price, last);
        assert_eq!(inst.change_amount, last - prev);
        assert!((inst.change_percent - (last - prev) / prev * 100.0).abs() < 1e-12);
        assert!((inst.earnings_per_share * inst.price_to_earnings - last).abs() < 1e-6);
    }

    #[test]
    fn test_market_series_independent_of_decorative_rng() {
        let a = Market::generate(
            &default_catalog(),
            today(),
            &GeneratorConfig::default(),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        let b = Market::generate(
            &default_catalog(),
            today(),
            &GeneratorConfig::default(),
            &mut StdRng::seed_from_u64(99),
        )
        .unwrap();
        for (x, y) in a.instruments().iter().zip(b.instruments()) {
            assert_eq!(x.series, y.series);
            assert_eq!(x.current_price, y.current_price);
        }
    }

    #[test]
    fn test_market_lookup_and_fallback() {
        let m = market();
        assert_eq!(m.instruments().len(), 10);
        assert_eq!(m.as_of(), today());
        assert_eq!(m.find("035420.KS").unwrap().name_en, "Naver");
        assert!(m.find("AAPL").is_none());
        assert_eq!(m.get_or_default("AAPL").id, "005930.KS");
        assert_eq!(m.get_or_default("000270.KS").id, "000270.KS");
        assert!(matches!(
            m.require("AAPL"),
            Err(AppError::InstrumentNotFound(_))
        ));
    }

    #[test]
    fn test_empty_market_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = Market::generate(&[], today(), &GeneratorConfig::default(), &mut rng);
        assert!(matches!(result, Err(AppError::InvalidConfig(_))));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let spec = InstrumentSpec::new("a", "A", "DUP", 100.0);
        let mut rng = StdRng::seed_from_u64(1);
        let result = Market::generate(
            &[spec.clone(), spec],
            today(),
            &GeneratorConfig::default(),
            &mut rng,
        );
        assert!(matches!(result, Err(AppError::InvalidConfig(_))));
    }
}
