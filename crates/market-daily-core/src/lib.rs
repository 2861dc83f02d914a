//! # Market Daily Core
//!
//! Two-stage daily market pipeline: build a dated snapshot from a CSV source and
//! an optional Alpha Vantage exchange-rate quote, then render it as Markdown.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Alpha Vantage exchange-rate client |
//! | [`builder`] | Row validation and snapshot assembly |
//! | [`config`] | Data directory and feed settings |
//! | [`domain`] | Snapshot, instrument and category types |
//! | [`error`] | Pipeline and feed errors |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`pipeline`] | `run_snapshot` / `run_report` entry points |
//! | [`report`] | Markdown renderer |
//! | [`source`] | CSV loader |
//! | [`store`] | Snapshot JSON persistence |
//!
//! ## Flow
//!
//! ```text
//! sources.csv ──▶ source ──┐
//!                          ├──▶ builder ──▶ store (save) ──▶ market_snapshot.json
//! Alpha Vantage ─▶ feed ───┘
//!
//! market_snapshot.json ──▶ store (load) ──▶ report ──▶ daily_report.md
//! ```
//!
//! ## Failure model
//!
//! Missing or malformed sources, unparsable numbers and I/O failures are fatal
//! [`PipelineError`]s. Unknown categories and every feed failure are logged and
//! the run continues; the report can always be produced from local data.
//!
//! The API key is read from `ALPHAVANTAGE_API_KEY` and never logged.

pub mod adapters;
pub mod builder;
pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod store;

pub use adapters::AlphaVantageFxClient;

pub use builder::{build_snapshot, build_snapshot_at, BuildOutcome, SkippedRow};

pub use config::{DailyConfig, FeedConfig, API_KEY_ENV, DEFAULT_FEED_TIMEOUT_MS, HOME_ENV};

pub use domain::{
    Category, FxQuote, Instrument, RawInstrumentRow, Snapshot, SnapshotDate, SNAPSHOT_OFFSET,
};

pub use error::{FailureCause, FeedError, PipelineError, ValidationError};

pub use http_client::{
    CannedHttpClient, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient,
};

pub use pipeline::{run_report, run_snapshot, ReportSummary};

pub use report::{format_amount, format_change, render, write_report};

pub use source::{load_sources, read_sources};

pub use store::{load_snapshot, save_snapshot, to_json_string};
