use market_daily_core::{run_report, DailyConfig};
use tracing::info;

use crate::cli::ReportArgs;
use crate::error::CliError;

pub fn run(args: &ReportArgs, config: &DailyConfig) -> Result<(), CliError> {
    let snapshot = args.snapshot.as_deref().unwrap_or(&config.snapshot_path);
    let output = args.output.as_deref().unwrap_or(&config.report_path);

    let summary = run_report(snapshot, output)?;
    info!("report for {} written ({} bytes)", summary.date, summary.bytes);

    println!("{}", output.display());
    Ok(())
}
