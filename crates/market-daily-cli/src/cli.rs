//! CLI argument definitions for market-daily.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `snapshot` | Build `market_snapshot.json` from `sources.csv` and the FX feed |
//! | `report` | Render `daily_report.md` from the snapshot |
//!
//! # Examples
//!
//! ```bash
//! # Build today's snapshot in ./data, skipping the network
//! market-daily --home data snapshot --offline
//!
//! # Render the report next to it
//! market-daily --home data report
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use market_daily_core::DEFAULT_FEED_TIMEOUT_MS;

/// Daily market snapshot and report builder.
#[derive(Debug, Parser)]
#[command(
    name = "market-daily",
    author,
    version,
    about = "Daily market snapshot and report builder",
    long_about = "Builds a dated market snapshot from a CSV instrument list plus an optional \
Alpha Vantage USD/JPY quote, and renders it as a Markdown report.\n\
\n\
Set ALPHAVANTAGE_API_KEY to enable the exchange-rate feed; without it the snapshot \
is built from the CSV alone."
)]
pub struct Cli {
    /// Data directory holding sources.csv, the snapshot and the report.
    ///
    /// Defaults to $MARKET_DAILY_HOME, then the current directory.
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    /// Only log warnings and errors (RUST_LOG still takes precedence).
    #[arg(long, short, global = true, default_value_t = false)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build and persist today's snapshot.
    Snapshot(SnapshotArgs),
    /// Render the Markdown report from a persisted snapshot.
    Report(ReportArgs),
}

#[derive(Debug, Args)]
pub struct SnapshotArgs {
    /// Instrument CSV. Defaults to <home>/sources.csv.
    #[arg(long)]
    pub sources: Option<PathBuf>,

    /// Snapshot destination. Defaults to <home>/market_snapshot.json.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Exchange-rate request timeout in milliseconds.
    #[arg(long, default_value_t = DEFAULT_FEED_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Skip the exchange-rate feed even when an API key is set.
    #[arg(long, default_value_t = false)]
    pub offline: bool,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Snapshot to render. Defaults to <home>/market_snapshot.json.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Report destination. Defaults to <home>/daily_report.md.
    #[arg(long)]
    pub output: Option<PathBuf>,
}
