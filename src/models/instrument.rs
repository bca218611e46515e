use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::price_bar::PriceBar;

/// Static metadata for one watchlist entry. The ticker doubles as the instrument id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSpec {
    pub name_ko: String,
    pub name_en: String,
    pub ticker: String,
    /// Starting price of the generated walk, in whole KRW.
    pub base_price: f64,
}

impl InstrumentSpec {
    pub fn new(name_ko: &str, name_en: &str, ticker: &str, base_price: f64) -> Self {
        Self {
            name_ko: name_ko.to_string(),
            name_en: name_en.to_string(),
            ticker: ticker.to_string(),
            base_price,
        }
    }
}

/// The fixed watchlist shown by the dashboard.
pub fn default_catalog() -> Vec<InstrumentSpec> {
    vec![
        InstrumentSpec::new("삼성전자", "Samsung Electronics", "005930.KS", 75_000.0),
        InstrumentSpec::new("SK하이닉스", "SK Hynix", "000660.KS", 140_000.0),
        InstrumentSpec::new("LG에너지솔루션", "LG Energy Solution", "373220.KS", 400_000.0),
        InstrumentSpec::new("삼성바이오로직스", "Samsung Biologics", "207940.KS", 800_000.0),
        InstrumentSpec::new("현대차", "Hyundai Motor", "005380.KS", 250_000.0),
        InstrumentSpec::new("기아", "Kia", "000270.KS", 120_000.0),
        InstrumentSpec::new("셀트리온", "Celltrion", "068270.KS", 180_000.0),
        InstrumentSpec::new("POSCO홀딩스", "POSCO Holdings", "005490.KS", 450_000.0),
        InstrumentSpec::new("NAVER", "Naver", "035420.KS", 200_000.0),
        InstrumentSpec::new("카카오", "Kakao", "035720.KS", 55_000.0),
    ]
}

/// Display language for instrument names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ko,
    En,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ko" => Ok(Language::Ko),
            "en" => Ok(Language::En),
            _ => Err(format!("Unknown language: {}", s)),
        }
    }
}

/// Lookback label for the performance table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PerformanceWindow {
    #[serde(rename = "1W")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "YTD")]
    YearToDate,
    #[serde(rename = "1Y")]
    OneYear,
}

impl PerformanceWindow {
    pub const ALL: [PerformanceWindow; 6] = [
        PerformanceWindow::OneWeek,
        PerformanceWindow::OneMonth,
        PerformanceWindow::ThreeMonths,
        PerformanceWindow::SixMonths,
        PerformanceWindow::YearToDate,
        PerformanceWindow::OneYear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceWindow::OneWeek => "1W",
            PerformanceWindow::OneMonth => "1M",
            PerformanceWindow::ThreeMonths => "3M",
            PerformanceWindow::SixMonths => "6M",
            PerformanceWindow::YearToDate => "YTD",
            PerformanceWindow::OneYear => "1Y",
        }
    }

    /// Half-width of the symmetric percent range a decorative return is drawn from.
    pub fn spread_pct(&self) -> f64 {
        match self {
            PerformanceWindow::OneWeek => 5.0,
            PerformanceWindow::OneMonth => 10.0,
            PerformanceWindow::ThreeMonths => 15.0,
            PerformanceWindow::SixMonths => 20.0,
            PerformanceWindow::YearToDate => 25.0,
            PerformanceWindow::OneYear => 30.0,
        }
    }
}

impl fmt::Display for PerformanceWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully generated instrument. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instrument {
    pub id: String,
    pub name_ko: String,
    pub name_en: String,
    pub ticker: String,
    pub current_price: f64,
    pub change_percent: f64,
    pub change_amount: f64,
    pub series: Vec<PriceBar>,
    pub market_cap: f64,
    pub volume: u64,
    pub price_to_earnings: f64,
    pub earnings_per_share: f64,
    pub performance: BTreeMap<PerformanceWindow, f64>,
}

impl Instrument {
    pub fn display_name(&self, language: Language) -> &str {
        match language {
            Language::Ko => &self.name_ko,
            Language::En => &self.name_en,
        }
    }
}
