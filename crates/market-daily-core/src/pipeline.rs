//! Both pipeline stages behind one result type.
//!
//! Callers decide how a [`PipelineError`] maps to a process exit status.

use std::path::Path;

use tracing::info;

use crate::adapters::AlphaVantageFxClient;
use crate::builder::{build_snapshot, BuildOutcome};
use crate::report::{render, write_report};
use crate::source::load_sources;
use crate::store::{load_snapshot, save_snapshot};
use crate::{PipelineError, SnapshotDate};

/// What a report run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub date: SnapshotDate,
    pub bytes: usize,
}

/// Load sources, fetch the optional quote, build and persist a snapshot.
///
/// `feed` of `None` skips the exchange-rate fetch entirely. Nothing is written
/// unless every fatal step succeeded.
pub async fn run_snapshot(
    sources_path: &Path,
    snapshot_path: &Path,
    feed: Option<&AlphaVantageFxClient>,
) -> Result<BuildOutcome, PipelineError> {
    let rows = load_sources(sources_path)?;

    let quote = match feed {
        Some(client) => client.fetch_quote().await,
        None => {
            info!("exchange-rate feed disabled");
            None
        }
    };
    if feed.is_some() && quote.is_none() {
        info!("continuing with tabular source data only");
    }

    let outcome = build_snapshot(&rows, quote)?;
    save_snapshot(snapshot_path, &outcome.snapshot)?;
    Ok(outcome)
}

/// Load a persisted snapshot and write its Markdown report.
pub fn run_report(snapshot_path: &Path, report_path: &Path) -> Result<ReportSummary, PipelineError> {
    let snapshot = load_snapshot(snapshot_path)?;
    let document = render(&snapshot);
    write_report(report_path, &document)?;

    Ok(ReportSummary {
        date: snapshot.date,
        bytes: document.len(),
    })
}
