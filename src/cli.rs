//! Command-line front end.
//!
//! Stands in for the dashboard's presentation layer: every subcommand maps
//! onto one or more functions in [`crate::commands`] and prints JSON to stdout.
//! Logs go to stderr and are filtered with `RUST_LOG`.
//!
//! ```bash
//! stock-trends list --lang en --pretty
//! stock-trends --as-of 2024-06-14 show 000660.KS --chart line --hide "EMA 60"
//! stock-trends export 035720.KS --out kakao.csv --indicator "MA 20" --indicator-out kakao-ma20.csv
//! stock-trends snapshot --out market.json
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::commands;
use crate::errors::AppError;
use crate::models::chart::{ChartView, InstrumentHeader};
use crate::models::instrument::Language;
use crate::AppState;

#[derive(Debug, Parser)]
#[command(
    name = "stock-trends",
    version,
    about = "Synthetic stock-market dashboard data"
)]
pub struct Cli {
    /// JSON dashboard configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Generate the market as of this date (YYYY-MM-DD) instead of today.
    #[arg(long, global = true)]
    pub as_of: Option<String>,

    /// Display language for instrument names (ko, en).
    #[arg(long, global = true)]
    pub lang: Option<Language>,

    /// Pretty-print JSON output.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the watchlist.
    List,
    /// Print header and chart data for one instrument.
    Show {
        /// Instrument id; unknown or missing ids show the first instrument.
        id: Option<String>,
        /// Chart type (candlestick, area, line).
        #[arg(long)]
        chart: Option<String>,
        /// Overlay label to hide. Repeatable.
        #[arg(long)]
        hide: Vec<String>,
    },
    /// Write an instrument's bars (and optionally an overlay) to CSV.
    Export {
        id: String,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, requires = "indicator_out")]
        indicator: Option<String>,
        #[arg(long, requires = "indicator")]
        indicator_out: Option<PathBuf>,
    },
    /// Write the whole generated market to a JSON file.
    Snapshot {
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Serialize)]
struct ShowOutput {
    header: InstrumentHeader,
    chart: ChartView,
}

pub fn execute(cli: &Cli, state: &mut AppState) -> Result<(), AppError> {
    match &cli.command {
        Command::List => print_json(&commands::list_instruments(state), cli.pretty),
        Command::Show { id, chart, hide } => {
            if let Some(id) = id {
                commands::select_instrument(state, id);
            }
            if let Some(chart) = chart {
                commands::set_chart_type(state, chart)?;
            }
            for label in hide {
                if state.selection.is_enabled(label) {
                    commands::toggle_indicator(state, label)?;
                } else if state.config.indicator(label).is_none() {
                    return Err(AppError::InvalidIndicatorParams(format!(
                        "unknown indicator: {}",
                        label
                    )));
                }
            }
            let output = ShowOutput {
                header: commands::get_header(state),
                chart: commands::get_chart(state),
            };
            print_json(&output, cli.pretty)
        }
        Command::Export {
            id,
            out,
            indicator,
            indicator_out,
        } => {
            let overlay = match (indicator, indicator_out) {
                (Some(label), Some(path)) => Some((label.as_str(), path.as_path())),
                _ => None,
            };
            commands::export_series(state, id, out, overlay)
        }
        Command::Snapshot { out } => commands::export_snapshot(state, out),
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), AppError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
