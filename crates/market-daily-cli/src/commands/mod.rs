mod report;
mod snapshot;

use market_daily_core::DailyConfig;
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let config = match &cli.home {
        Some(home) => DailyConfig::with_home(home),
        None => DailyConfig::from_env(),
    };
    debug!("data directory {}", config.home.display());

    match &cli.command {
        Command::Snapshot(args) => snapshot::run(args, &config).await,
        Command::Report(args) => report::run(args, &config),
    }
}
