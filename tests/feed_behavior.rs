//! Behavior-driven tests for the exchange-rate feed
//!
//! The feed is optional: every failure must surface as "no quote" rather than
//! an error that stops the pipeline.

use std::sync::Arc;

use market_daily_core::{
    AlphaVantageFxClient, CannedHttpClient, FeedConfig, FeedError, HttpError, HttpResponse,
};
use market_daily_tests::keyed_feed;

#[tokio::test]
async fn every_upstream_failure_yields_no_quote() {
    let failures = vec![
        CannedHttpClient::failing(HttpError::timeout("request timeout: operation timed out")),
        CannedHttpClient::failing(HttpError::new("connection failed: dns error")),
        CannedHttpClient::new(Ok(HttpResponse::new(500, "internal error"))),
        CannedHttpClient::ok_json("not json"),
        CannedHttpClient::ok_json(r#"{"Error Message": "Invalid API call."}"#),
        CannedHttpClient::ok_json(r#"{"Realtime Currency Exchange Rate": {}}"#),
        CannedHttpClient::ok_json(r#"{"Realtime Currency Exchange Rate": {"5. Exchange Rate": "Infinity"}}"#),
        CannedHttpClient::ok_json(r#"{"Realtime Currency Exchange Rate": {"5. Exchange Rate": true}}"#),
    ];

    for http in failures {
        let http = Arc::new(http);
        let feed = keyed_feed(http.clone());

        assert_eq!(feed.fetch_quote().await, None);
        assert_eq!(http.recorded_requests().len(), 1, "exactly one attempt, no retries");
    }
}

#[tokio::test]
async fn timeout_is_bounded_by_configuration() {
    let http = Arc::new(CannedHttpClient::failing(HttpError::timeout("request timeout")));
    let feed = AlphaVantageFxClient::with_http_client(
        http.clone(),
        FeedConfig::usd_jpy(Some(String::from("demo"))).with_timeout_ms(250),
    );

    let error = feed.try_fetch_quote().await.expect_err("timed out");

    assert_eq!(error, FeedError::Timeout { timeout_ms: 250 });
    assert_eq!(http.recorded_requests()[0].timeout_ms, 250);
}

#[tokio::test]
async fn api_key_does_not_leak_into_error_messages() {
    let http = Arc::new(CannedHttpClient::new(Ok(HttpResponse::new(403, "forbidden"))));
    let feed = AlphaVantageFxClient::with_http_client(
        http,
        FeedConfig::usd_jpy(Some(String::from("super-secret"))),
    );

    let error = feed.try_fetch_quote().await.expect_err("forbidden");

    assert_eq!(error, FeedError::Status(403));
    assert!(!error.to_string().contains("super-secret"));
    assert!(!format!("{:?}", feed.config()).contains("super-secret"));
}

#[tokio::test]
async fn custom_base_url_and_pair_are_used() {
    let http = Arc::new(CannedHttpClient::ok_json(
        r#"{"Realtime Currency Exchange Rate": {"5. Exchange Rate": "1.08450000"}}"#,
    ));
    let mut config = FeedConfig::usd_jpy(Some(String::from("demo")))
        .with_base_url("http://127.0.0.1:9/query");
    config.from_currency = String::from("EUR");
    config.to_currency = String::from("USD");
    let feed = AlphaVantageFxClient::with_http_client(http.clone(), config);

    let quote = feed.fetch_quote().await.expect("quote");

    assert_eq!(quote.symbol, "EURUSD");
    assert_eq!(quote.name, "EUR/USD");
    assert!(http.recorded_requests()[0]
        .url
        .starts_with("http://127.0.0.1:9/query?function=CURRENCY_EXCHANGE_RATE&from_currency=EUR&to_currency=USD"));
}
