//! Snapshot assembly from source rows and the optional feed quote.

use time::OffsetDateTime;
use tracing::{info, warn};

use crate::{
    Category, FxQuote, Instrument, PipelineError, RawInstrumentRow, Snapshot, SnapshotDate,
};

/// A source row dropped because of its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: u64,
    pub category: String,
}

/// Result of a successful build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOutcome {
    pub snapshot: Snapshot,
    pub skipped: Vec<SkippedRow>,
}

/// Build a snapshot dated today in UTC+9.
pub fn build_snapshot(
    rows: &[RawInstrumentRow],
    quote: Option<FxQuote>,
) -> Result<BuildOutcome, PipelineError> {
    build_snapshot_at(rows, quote, OffsetDateTime::now_utc())
}

/// Build a snapshot as of `now`.
///
/// Rows with an unknown (or feed-only) category are skipped with a warning.
/// An unparsable numeric cell aborts the whole build; an absent one is `0.0`.
pub fn build_snapshot_at(
    rows: &[RawInstrumentRow],
    quote: Option<FxQuote>,
    now: OffsetDateTime,
) -> Result<BuildOutcome, PipelineError> {
    let mut snapshot = Snapshot::empty(SnapshotDate::from_instant(now));
    let mut skipped = Vec::new();

    for row in rows {
        let raw_category = row.category.as_deref().unwrap_or_default();
        let category = match Category::parse(raw_category) {
            Ok(category) if !category.is_feed_only() => category,
            _ => {
                warn!(
                    "unknown category '{}' at line {}, skipping row",
                    raw_category, row.line
                );
                skipped.push(SkippedRow {
                    line: row.line,
                    category: raw_category.to_owned(),
                });
                continue;
            }
        };

        let instrument = normalize_row(row, category)?;
        match category {
            Category::Equity => snapshot.equity.push(instrument),
            Category::Commodities => snapshot.commodities.push(instrument),
            Category::Crypto => snapshot.crypto.push(instrument),
            Category::Fx => {}
        }
    }

    if let Some(quote) = quote {
        snapshot.fx.push(quote);
    }

    info!(
        "built snapshot for {}: equity={} commodities={} crypto={} fx={} skipped={}",
        snapshot.date,
        snapshot.equity.len(),
        snapshot.commodities.len(),
        snapshot.crypto.len(),
        snapshot.fx.len(),
        skipped.len()
    );

    Ok(BuildOutcome { snapshot, skipped })
}

fn normalize_row(row: &RawInstrumentRow, category: Category) -> Result<Instrument, PipelineError> {
    let mut instrument = Instrument::new(
        row.symbol.as_deref().unwrap_or_default().trim(),
        row.name.as_deref().unwrap_or_default().trim(),
        parse_number(row.line, "price", row.price.as_deref())?,
        parse_number(row.line, "change", row.change.as_deref())?,
        parse_number(row.line, "change_pct", row.change_pct.as_deref())?,
    );

    if category == Category::Commodities {
        if let Some(unit) = row.unit.as_deref().map(str::trim).filter(|unit| !unit.is_empty()) {
            instrument = instrument.with_unit(unit);
        }
    }

    Ok(instrument)
}

/// Absent or blank is `0.0`; anything else must parse to a finite float.
fn parse_number(line: u64, field: &'static str, raw: Option<&str>) -> Result<f64, PipelineError> {
    let text = raw.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Ok(0.0);
    }

    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| PipelineError::DataConversion {
            line,
            field,
            value: text.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn row(line: u64, category: &str, symbol: &str, price: &str, unit: Option<&str>) -> RawInstrumentRow {
        RawInstrumentRow {
            line,
            category: Some(category.to_owned()),
            symbol: Some(symbol.to_owned()),
            name: Some(format!("{symbol} name")),
            price: Some(price.to_owned()),
            change: Some(String::from("1.5")),
            change_pct: Some(String::from("0.5")),
            unit: unit.map(str::to_owned),
        }
    }

    #[test]
    fn rows_are_bucketed_by_category_in_source_order() {
        let rows = vec![
            row(2, "equity", "SPX", "5000", None),
            row(3, "Crypto", "BTC", "65000", None),
            row(4, " EQUITY ", "N225", "39000", None),
        ];

        let outcome = build_snapshot_at(&rows, None, datetime!(2024-04-01 00:00 UTC))
            .expect("build succeeds");

        let symbols: Vec<_> = outcome.snapshot.equity.iter().map(|i| i.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["SPX", "N225"]);
        assert_eq!(outcome.snapshot.crypto.len(), 1);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn unknown_and_feed_only_categories_are_skipped() {
        let rows = vec![
            row(2, "bonds", "UST10Y", "4.2", None),
            row(3, "fx", "EURUSD", "1.08", None),
            row(4, "equity", "SPX", "5000", None),
        ];

        let outcome = build_snapshot_at(&rows, None, datetime!(2024-04-01 00:00 UTC))
            .expect("build succeeds");

        assert_eq!(outcome.snapshot.equity.len(), 1);
        assert!(outcome.snapshot.fx.is_empty());
        assert_eq!(
            outcome.skipped,
            vec![
                SkippedRow { line: 2, category: String::from("bonds") },
                SkippedRow { line: 3, category: String::from("fx") },
            ]
        );
    }

    #[test]
    fn unit_is_kept_only_for_commodities() {
        let rows = vec![
            row(2, "commodities", "XAU", "2300", Some("USD/oz")),
            row(3, "commodities", "WTI", "80", Some("  ")),
            row(4, "crypto", "ETH", "3500", Some("USD")),
        ];

        let outcome = build_snapshot_at(&rows, None, datetime!(2024-04-01 00:00 UTC))
            .expect("build succeeds");

        assert_eq!(outcome.snapshot.commodities[0].unit.as_deref(), Some("USD/oz"));
        assert_eq!(outcome.snapshot.commodities[1].unit, None);
        assert_eq!(outcome.snapshot.crypto[0].unit, None);
    }

    #[test]
    fn missing_numbers_default_to_zero() {
        let rows = vec![RawInstrumentRow {
            line: 2,
            category: Some(String::from("equity")),
            symbol: Some(String::from("SPX")),
            ..RawInstrumentRow::default()
        }];

        let outcome = build_snapshot_at(&rows, None, datetime!(2024-04-01 00:00 UTC))
            .expect("build succeeds");

        let instrument = &outcome.snapshot.equity[0];
        assert_eq!(instrument.name, "");
        assert_eq!((instrument.price, instrument.change, instrument.change_pct), (0.0, 0.0, 0.0));
    }

    #[test]
    fn malformed_number_aborts_build() {
        let rows = vec![
            row(2, "equity", "SPX", "5000", None),
            row(3, "equity", "N225", "abc", None),
        ];

        let error = build_snapshot_at(&rows, None, datetime!(2024-04-01 00:00 UTC))
            .expect_err("must fail");

        match error {
            PipelineError::DataConversion { line, field, value } => {
                assert_eq!((line, field, value.as_str()), (3, "price", "abc"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_finite_number_aborts_build() {
        let rows = vec![row(2, "crypto", "BTC", "NaN", None)];
        let result = build_snapshot_at(&rows, None, datetime!(2024-04-01 00:00 UTC));
        assert!(matches!(result, Err(PipelineError::DataConversion { .. })));
    }

    #[test]
    fn malformed_number_in_skipped_row_is_ignored() {
        let rows = vec![row(2, "bonds", "UST", "oops", None)];
        let outcome = build_snapshot_at(&rows, None, datetime!(2024-04-01 00:00 UTC))
            .expect("skipped rows are not converted");
        assert_eq!(outcome.skipped.len(), 1);
    }

    #[test]
    fn quote_is_appended_to_fx_and_date_uses_utc_plus_nine() {
        let quote = FxQuote::new("USDJPY", "USD/JPY", 151.25, "2024-03-31 23:59:00");

        let outcome = build_snapshot_at(&[], Some(quote.clone()), datetime!(2024-03-31 16:00 UTC))
            .expect("build succeeds");

        assert_eq!(outcome.snapshot.fx, vec![quote]);
        assert_eq!(outcome.snapshot.date.to_string(), "2024-04-01");
    }
}
