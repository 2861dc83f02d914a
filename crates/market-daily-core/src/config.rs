//! Path and feed configuration resolved from the environment.

use std::env;
use std::fmt::{Debug, Formatter};
use std::path::PathBuf;

/// Data directory override.
pub const HOME_ENV: &str = "MARKET_DAILY_HOME";
/// Alpha Vantage credential. Unset or blank disables the feed.
pub const API_KEY_ENV: &str = "ALPHAVANTAGE_API_KEY";

pub const DEFAULT_FEED_TIMEOUT_MS: u64 = 30_000;
pub const ALPHAVANTAGE_QUERY_URL: &str = "https://www.alphavantage.co/query";

/// File locations for one pipeline home.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyConfig {
    pub home: PathBuf,
    pub sources_path: PathBuf,
    pub snapshot_path: PathBuf,
    pub report_path: PathBuf,
}

impl DailyConfig {
    pub fn from_env() -> Self {
        Self::with_home(resolve_home())
    }

    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            sources_path: home.join("sources.csv"),
            snapshot_path: home.join("market_snapshot.json"),
            report_path: home.join("daily_report.md"),
            home,
        }
    }
}

/// Settings for the exchange-rate feed.
#[derive(Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub base_url: String,
    pub from_currency: String,
    pub to_currency: String,
    pub api_key: Option<String>,
    pub timeout_ms: u64,
}

impl FeedConfig {
    /// USD to JPY against the public Alpha Vantage endpoint.
    pub fn usd_jpy(api_key: Option<String>) -> Self {
        Self {
            base_url: String::from(ALPHAVANTAGE_QUERY_URL),
            from_currency: String::from("USD"),
            to_currency: String::from("JPY"),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            timeout_ms: DEFAULT_FEED_TIMEOUT_MS,
        }
    }

    pub fn from_env() -> Self {
        Self::usd_jpy(env::var(API_KEY_ENV).ok())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Pair symbol, e.g. `USDJPY`.
    pub fn symbol(&self) -> String {
        format!("{}{}", self.from_currency, self.to_currency)
    }

    /// Pair display name, e.g. `USD/JPY`.
    pub fn display_name(&self) -> String {
        format!("{}/{}", self.from_currency, self.to_currency)
    }
}

impl Debug for FeedConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedConfig")
            .field("base_url", &self.base_url)
            .field("from_currency", &self.from_currency)
            .field("to_currency", &self.to_currency)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

fn resolve_home() -> PathBuf {
    if let Some(path) = env::var_os(HOME_ENV) {
        let path = PathBuf::from(path);
        if !path.as_os_str().is_empty() {
            return path;
        }
    }

    PathBuf::from(".")
}
