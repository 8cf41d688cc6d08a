#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod analysis;
pub mod app;
pub mod chart;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod models;
pub mod utils;

// Re-export commonly used types outside of crate (for make_cache.rs and tests)
pub use app::run_app;
pub use data::{CacheFile, SeriesSource, load_dataset};
pub use domain::{HistogramPeriod, Overlay, RollingWindow, SeriesId};
pub use engine::{ChartController, SelectionEvent, SelectionState};
pub use models::{Dataset, DerivedSeries, Series};

// CLI argument parsing
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{DASHBOARD, SOURCE};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Cache artifact path (default: oil_data/oil_prices_v<schema>.bin)
    #[arg(long, global = true)]
    pub cache: Option<PathBuf>,

    /// Data package descriptor fetched when no cache exists
    #[arg(long, global = true, default_value = SOURCE.datapackage_url)]
    pub source_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Publish the chart payloads for one selection and exit
    Render(SelectionArgs),
    /// Publish, then read selection events from stdin until `quit`
    Listen(SelectionArgs),
    /// Print a table of the loaded series
    Summary,
}

#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Initial series, e.g. brent-daily or wti-month
    #[arg(long, default_value_t = DASHBOARD.default_series)]
    pub series: SeriesId,

    /// Moving-average overlays, comma separated (SMA20, SMA50, SMA100)
    #[arg(long = "overlay", value_delimiter = ',')]
    pub overlays: Vec<Overlay>,

    /// Histogram lookback: 20, 60, 100 or 250
    #[arg(long, default_value_t = DASHBOARD.default_period)]
    pub period: HistogramPeriod,
}

impl From<SelectionArgs> for SelectionState {
    fn from(args: SelectionArgs) -> Self {
        Self {
            series: args.series,
            overlays: args.overlays.into_iter().collect(),
            period: args.period,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_render_selection() {
        let cli = Cli::try_parse_from([
            "oil-gauge",
            "--cache",
            "/tmp/prices.bin",
            "render",
            "--series",
            "wti-week",
            "--overlay",
            "SMA50,SMA20",
            "--period",
            "60",
        ])
        .unwrap();

        assert_eq!(cli.cache, Some(PathBuf::from("/tmp/prices.bin")));
        assert_eq!(cli.source_url, SOURCE.datapackage_url);
        let Command::Render(args) = cli.command else {
            panic!("expected render");
        };
        let state = SelectionState::from(args);
        assert_eq!(state.series, SeriesId::WtiWeek);
        assert_eq!(state.overlays.len(), 2);
        assert_eq!(state.period, HistogramPeriod::P60);
    }

    #[test]
    fn cli_defaults_and_rejects_bad_period() {
        let cli = Cli::try_parse_from(["oil-gauge", "listen"]).unwrap();
        let Command::Listen(args) = cli.command else {
            panic!("expected listen");
        };
        assert_eq!(SelectionState::from(args), SelectionState::default());

        assert!(Cli::try_parse_from(["oil-gauge", "render", "--period", "50"]).is_err());
    }
}
