use serde::{Deserialize, Serialize};

use crate::{Category, SnapshotDate};

/// One row of the tabular source before validation.
///
/// Absent columns and blank cells both load as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawInstrumentRow {
    /// 1-based line number in the source file.
    #[serde(skip)]
    pub line: u64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub change: Option<String>,
    #[serde(default)]
    pub change_pct: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Normalized instrument entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_pct: f64,
    /// Quotation unit; only commodities carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Instrument {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        change: f64,
        change_pct: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            price,
            change,
            change_pct,
            unit: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// Exchange-rate quote from the external feed.
///
/// The feed only reports a level, so `change` and `change_pct` are always zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FxQuote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_pct: f64,
    /// Timestamp exactly as reported upstream.
    pub last_refreshed: String,
}

impl FxQuote {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        last_refreshed: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            price,
            change: 0.0,
            change_pct: 0.0,
            last_refreshed: last_refreshed.into(),
        }
    }
}

/// Single-day categorized market snapshot.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub date: SnapshotDate,
    #[serde(default)]
    pub equity: Vec<Instrument>,
    #[serde(default)]
    pub commodities: Vec<Instrument>,
    #[serde(default)]
    pub crypto: Vec<Instrument>,
    #[serde(default)]
    pub fx: Vec<FxQuote>,
}

impl Snapshot {
    pub fn empty(date: SnapshotDate) -> Self {
        Self {
            date,
            equity: Vec::new(),
            commodities: Vec::new(),
            crypto: Vec::new(),
            fx: Vec::new(),
        }
    }

    /// Instruments of a source category. `Fx` holds quotes, see [`Snapshot::fx`].
    pub fn instruments(&self, category: Category) -> &[Instrument] {
        match category {
            Category::Equity => &self.equity,
            Category::Commodities => &self.commodities,
            Category::Crypto => &self.crypto,
            Category::Fx => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_is_omitted_from_json_when_absent() {
        let instrument = Instrument::new("SPX", "S&P 500", 5000.0, 10.0, 0.2);
        let json = serde_json::to_value(&instrument).expect("serializable");
        assert!(json.get("unit").is_none());

        let gold = Instrument::new("XAU", "Gold", 2300.0, -4.5, -0.19).with_unit("USD/oz");
        let json = serde_json::to_value(&gold).expect("serializable");
        assert_eq!(json["unit"], "USD/oz");
    }

    #[test]
    fn fx_quote_has_zero_change() {
        let quote = FxQuote::new("USDJPY", "USD/JPY", 151.2, "2024-04-01 01:00:00");
        assert_eq!(quote.change, 0.0);
        assert_eq!(quote.change_pct, 0.0);
    }

    #[test]
    fn missing_categories_deserialize_as_empty() {
        let snapshot: Snapshot =
            serde_json::from_str(r#"{"date":"2024-04-01","equity":[]}"#).expect("valid snapshot");
        assert!(snapshot.commodities.is_empty());
        assert!(snapshot.crypto.is_empty());
        assert!(snapshot.fx.is_empty());
        assert!(snapshot.instruments(Category::Fx).is_empty());
    }
}
