pub mod cli;
pub mod commands;
pub mod engine;
pub mod errors;
pub mod models;
pub mod utils;

use std::sync::Arc;

use chrono::NaiveDate;
use clap::Parser;
use rand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::engine::market::Market;
use crate::engine::selection::Selection;
use crate::errors::AppError;
use crate::models::config::DashboardConfig;
use crate::models::instrument::default_catalog;

/// Session state handed to the presentation layer.
pub struct AppState {
    /// Generated once at startup; read-only afterwards.
    pub market: Arc<Market>,
    pub config: DashboardConfig,
    pub selection: Selection,
}

impl AppState {
    /// Generate the market for `today`, drawing decorative metrics from `rng`.
    pub fn new<R: Rng>(
        config: DashboardConfig,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<Self, AppError> {
        config.validate()?;
        let market = Market::generate(&default_catalog(), today, &config.generator, rng)?;
        Ok(Self::with_market(Arc::new(market), config))
    }

    pub fn with_market(market: Arc<Market>, config: DashboardConfig) -> Self {
        let selection = Selection::new(&market, &config);
        Self {
            market,
            config,
            selection,
        }
    }
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    info!("Starting Stock Trends");

    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    if let Some(lang) = cli.lang {
        config.language = lang;
    }
    let today = match cli.as_of.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(AppError::from)?,
        None => chrono::Local::now().date_naive(),
    };

    let mut state = AppState::new(config, today, &mut rand::thread_rng())?;
    cli::execute(&cli, &mut state)?;
    Ok(())
}
