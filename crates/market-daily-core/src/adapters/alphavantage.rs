use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::API_KEY_ENV;
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{FeedConfig, FeedError, FxQuote};

/// Alpha Vantage `CURRENCY_EXCHANGE_RATE` client for a single currency pair.
///
/// Issues at most one request per call and never retries.
#[derive(Clone)]
pub struct AlphaVantageFxClient {
    http_client: Arc<dyn HttpClient>,
    config: FeedConfig,
}

impl AlphaVantageFxClient {
    pub fn new(config: FeedConfig) -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()), config)
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: FeedConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Fetch the quote, logging and swallowing every failure.
    pub async fn fetch_quote(&self) -> Option<FxQuote> {
        match self.try_fetch_quote().await {
            Ok(quote) => {
                info!(
                    "fetched {}: {:.2} (as of {})",
                    quote.symbol, quote.price, quote.last_refreshed
                );
                Some(quote)
            }
            Err(FeedError::MissingCredential) => {
                info!("{API_KEY_ENV} not set, skipping exchange-rate fetch");
                None
            }
            Err(error) => {
                warn!(
                    "exchange-rate fetch for {} failed, continuing without it: {error}",
                    self.config.symbol()
                );
                None
            }
        }
    }

    /// Fetch the quote, reporting why it is unavailable.
    pub async fn try_fetch_quote(&self) -> Result<FxQuote, FeedError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(FeedError::MissingCredential)?;

        info!("fetching {} from Alpha Vantage", self.config.symbol());
        let request = HttpRequest::get(self.endpoint(api_key))
            .with_header("accept", "application/json")
            .with_timeout_ms(self.config.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|error| {
            if error.timed_out() {
                FeedError::Timeout {
                    timeout_ms: self.config.timeout_ms,
                }
            } else {
                FeedError::Transport(error.message().to_owned())
            }
        })?;

        if !response.is_success() {
            return Err(FeedError::Status(response.status));
        }

        normalize_rate(&response.body, &self.config)
    }

    fn endpoint(&self, api_key: &str) -> String {
        format!(
            "{}?function=CURRENCY_EXCHANGE_RATE&from_currency={}&to_currency={}&apikey={}",
            self.config.base_url,
            urlencoding::encode(&self.config.from_currency),
            urlencoding::encode(&self.config.to_currency),
            urlencoding::encode(api_key)
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
struct AlphaVantageRateResponse {
    #[serde(rename = "Realtime Currency Exchange Rate", default)]
    rate: Option<AlphaVantageRatePayload>,
    #[serde(rename = "Error Message", default)]
    error_message: Option<String>,
    #[serde(rename = "Note", default)]
    note: Option<String>,
    #[serde(rename = "Information", default)]
    information: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct AlphaVantageRatePayload {
    #[serde(rename = "5. Exchange Rate", default)]
    exchange_rate: Option<Value>,
    #[serde(rename = "6. Last Refreshed", default)]
    last_refreshed: Option<String>,
}

fn normalize_rate(body: &str, config: &FeedConfig) -> Result<FxQuote, FeedError> {
    let response: AlphaVantageRateResponse =
        serde_json::from_str(body).map_err(|e| FeedError::InvalidBody(e.to_string()))?;

    let Some(payload) = response.rate else {
        // Throttling and bad-key replies arrive as 200 with one of these fields.
        return Err(response
            .error_message
            .or(response.note)
            .or(response.information)
            .map(FeedError::Rejected)
            .unwrap_or(FeedError::MissingRate));
    };

    let price = match payload.exchange_rate.ok_or(FeedError::MissingRate)? {
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| FeedError::InvalidRate(text.clone()))?,
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| FeedError::InvalidRate(number.to_string()))?,
        other => return Err(FeedError::InvalidRate(other.to_string())),
    };

    if !price.is_finite() {
        return Err(FeedError::InvalidRate(price.to_string()));
    }

    Ok(FxQuote::new(
        config.symbol(),
        config.display_name(),
        price,
        payload.last_refreshed.unwrap_or_default(),
    ))
}
