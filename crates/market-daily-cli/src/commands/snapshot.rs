use market_daily_core::{run_snapshot, AlphaVantageFxClient, DailyConfig, FeedConfig};
use tracing::{info, warn};

use crate::cli::SnapshotArgs;
use crate::error::CliError;

pub async fn run(args: &SnapshotArgs, config: &DailyConfig) -> Result<(), CliError> {
    if args.timeout_ms == 0 {
        return Err(CliError::InvalidArgument(String::from(
            "--timeout-ms must be greater than zero",
        )));
    }

    let sources = args.sources.as_deref().unwrap_or(&config.sources_path);
    let output = args.output.as_deref().unwrap_or(&config.snapshot_path);

    let feed = if args.offline {
        info!("--offline set, skipping exchange-rate fetch");
        None
    } else {
        Some(AlphaVantageFxClient::new(
            FeedConfig::from_env().with_timeout_ms(args.timeout_ms),
        ))
    };

    let outcome = run_snapshot(sources, output, feed.as_ref()).await?;
    if !outcome.skipped.is_empty() {
        warn!(
            "{} row(s) skipped because of an unknown category",
            outcome.skipped.len()
        );
    }

    println!("{}", output.display());
    Ok(())
}
