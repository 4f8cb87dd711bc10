use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One trading day of OHLCV data for an instrument.
///
/// Bars are immutable once recorded; there is at most one bar per
/// (symbol, date). Prices serialize as JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PriceBar {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub open: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub high: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub low: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub close: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub adjusted_close: Decimal,
    pub volume: i64,
}

/// A `PriceBar` tagged with the (lower-cased) symbol it belongs to.
///
/// This is the unit a price store hands back for range queries that may span
/// several instruments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SymbolBar {
    pub symbol: String,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub bar: PriceBar,
}

impl SymbolBar {
    pub fn new(symbol: &str, bar: PriceBar) -> Self {
        Self {
            symbol: symbol.to_lowercase(),
            bar,
        }
    }
}

/// A tradable instrument. Symbols are unique, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Instrument {
    pub id: i32,
    pub name: String,
    pub symbol: String,
    pub founded: NaiveDate,
    pub description: Option<String>,
}

/// The fields required to register a new instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInstrument {
    pub name: String,
    pub symbol: String,
    pub founded: NaiveDate,
    pub description: Option<String>,
}

/// A partial update; only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentUpdate {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub founded: Option<NaiveDate>,
    pub description: Option<String>,
}

impl InstrumentUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.symbol.is_none()
            && self.founded.is_none()
            && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn sample_bar() -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            open: dec!(10.5),
            high: dec!(12.25),
            low: dec!(9.75),
            close: dec!(11),
            adjusted_close: dec!(11),
            volume: 1200,
        }
    }

    #[test]
    fn bar_prices_serialize_as_numbers() {
        let value = serde_json::to_value(sample_bar()).unwrap();
        assert_eq!(value["date"], json!("2024-01-02"));
        assert_eq!(value["open"], json!(10.5));
        assert_eq!(value["high"], json!(12.25));
        assert_eq!(value["low"], json!(9.75));
        assert_eq!(value["close"], json!(11.0));
        assert_eq!(value["adjusted_close"], json!(11.0));
        assert_eq!(value["volume"], json!(1200));
    }

    #[test]
    fn symbol_bar_flattens_and_lowercases() {
        let value = serde_json::to_value(SymbolBar::new("AAPL", sample_bar())).unwrap();
        assert_eq!(value["symbol"], json!("aapl"));
        assert!(value["low"].is_number());
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(InstrumentUpdate::default().is_empty());
        let update = InstrumentUpdate {
            name: Some("Apple".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
