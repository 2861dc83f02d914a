//! Markdown rendering of a [`Snapshot`].
//!
//! The headings, table headers, alignment rows, notes and disclaimer are a
//! compatibility contract with previously published reports. Changing any of
//! them is a format version bump.

use std::path::Path;

use tracing::info;

use crate::store::write_atomic;
use crate::{Category, Instrument, PipelineError, Snapshot};

const TITLE: &str = "# Market Daily Report";
const NO_DATA: &str = "データがありません。";
const DISCLAIMER: &str = "*本レポートは市場データの記録を目的としており、投資助言ではありません。*";

struct Section {
    category: Category,
    heading: &'static str,
    header: &'static str,
    alignment: &'static str,
    note: &'static str,
    with_unit: bool,
}

const SECTIONS: [Section; 3] = [
    Section {
        category: Category::Equity,
        heading: "## Equity (株式指数)",
        header: "| Symbol | Name | Price | Change |",
        alignment: "|--------|------|------:|-------:|",
        note: "> 株式指数は市場全体の動向を示す指標です。値動きは様々な要因により変動します。",
        with_unit: false,
    },
    Section {
        category: Category::Commodities,
        heading: "## Commodities (コモディティ)",
        header: "| Symbol | Name | Price | Unit | Change |",
        alignment: "|--------|------|------:|------|-------:|",
        note: "> コモディティ価格は需給バランスや市場環境により日々変動します。",
        with_unit: true,
    },
    Section {
        category: Category::Crypto,
        heading: "## Crypto (暗号資産)",
        header: "| Symbol | Name | Price (USD) | Change |",
        alignment: "|--------|------|------------:|-------:|",
        note: "> 暗号資産は高いボラティリティを持つ資産クラスです。価格は24時間変動します。",
        with_unit: false,
    },
];

/// Render the daily report. Pure: equal snapshots give byte-identical output.
pub fn render(snapshot: &Snapshot) -> String {
    let mut lines: Vec<String> = vec![
        TITLE.to_owned(),
        String::new(),
        format!("**Date:** {}", snapshot.date),
        String::new(),
    ];

    for section in &SECTIONS {
        lines.push(section.heading.to_owned());
        lines.push(String::new());

        let instruments = snapshot.instruments(section.category);
        if instruments.is_empty() {
            lines.push(NO_DATA.to_owned());
        } else {
            lines.push(section.header.to_owned());
            lines.push(section.alignment.to_owned());
            lines.extend(instruments.iter().map(|item| table_row(item, section.with_unit)));
            lines.push(String::new());
            lines.push(section.note.to_owned());
        }
        lines.push(String::new());
    }

    lines.push(String::from("---"));
    lines.push(String::new());
    lines.push(DISCLAIMER.to_owned());
    lines.push(String::new());

    lines.join("\n")
}

/// Atomically write a rendered report to `path`.
pub fn write_report(path: &Path, document: &str) -> Result<(), PipelineError> {
    write_atomic(path, document.as_bytes())?;
    info!("wrote report to {}", path.display());
    Ok(())
}

fn table_row(item: &Instrument, with_unit: bool) -> String {
    let price = format_amount(item.price);
    let change = format_change(item.change, item.change_pct);
    if with_unit {
        format!(
            "| {} | {} | {} | {} | {} |",
            item.symbol,
            item.name,
            price,
            item.unit.as_deref().unwrap_or("-"),
            change
        )
    } else {
        format!("| {} | {} | {} | {} |", item.symbol, item.name, price, change)
    }
}

/// `+12.50 (+2.30%)` for gains, `-3.00 (-0.40%)` for losses.
///
/// The sign prefix is chosen from `change` and applied to both figures, so a
/// negative zero renders as `+-0.00`, the same bytes earlier reports carried.
pub fn format_change(change: f64, change_pct: f64) -> String {
    let sign = if change >= 0.0 { "+" } else { "" };
    format!("{sign}{} ({sign}{change_pct:.2}%)", format_amount(change))
}

/// Two decimals with comma thousands separators, e.g. `-1,234,567.89`.
///
/// The sign follows the sign bit, so `-0.0` and `-0.001` give `-0.00`.
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3 + 4);
    if value.is_sign_negative() {
        grouped.push('-');
    }
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped.push('.');
    grouped.push_str(fraction);
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SnapshotDate;

    #[test]
    fn amounts_use_thousands_separators() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.994), "999.99");
        assert_eq!(format_amount(999.999), "1,000.00");
        assert_eq!(format_amount(1_234_567.891), "1,234,567.89");
        assert_eq!(format_amount(-45_000.5), "-45,000.50");
    }

    #[test]
    fn negative_zero_keeps_its_sign() {
        assert_eq!(format_amount(-0.0), "-0.00");
        assert_eq!(format_amount(-0.004), "-0.00");
        assert_eq!(format_change(-0.0, -0.0), "+-0.00 (+-0.00%)");
        assert_eq!(format_change(0.0, -0.0), "+0.00 (+-0.00%)");
        assert_eq!(format_change(-0.004, -0.001), "-0.00 (-0.00%)");
    }

    #[test]
    fn change_carries_sign_of_the_move() {
        assert_eq!(format_change(12.5, 2.3), "+12.50 (+2.30%)");
        assert_eq!(format_change(-1_250.0, -1.84), "-1,250.00 (-1.84%)");
        assert_eq!(format_change(0.0, 0.0), "+0.00 (+0.00%)");
    }

    #[test]
    fn empty_snapshot_renders_placeholders_for_every_section() {
        let document = render(&Snapshot::empty(SnapshotDate::parse("2024-04-01").expect("valid")));

        assert_eq!(document.matches(NO_DATA).count(), 3);
        assert!(!document.contains("| Symbol |"));
        assert!(document.ends_with(&format!("---\n\n{DISCLAIMER}\n")));
    }

    #[test]
    fn commodity_without_unit_renders_dash() {
        let mut snapshot = Snapshot::empty(SnapshotDate::parse("2024-04-01").expect("valid"));
        snapshot
            .commodities
            .push(Instrument::new("WTI", "WTI Crude", 83.17, 0.0, 0.0));

        let document = render(&snapshot);

        assert!(document.contains("| WTI | WTI Crude | 83.17 | - | +0.00 (+0.00%) |"));
    }
}
