use crate::error::AnalyticsError;
use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::{DateWindow, PriceBar, SymbolBar};
use std::collections::{BTreeMap, BTreeSet};

/// The read-only view of the bar archive that the analytics engine queries.
///
/// Implementations must match symbols case-insensitively and return bars with
/// lower-cased symbols, ordered by (symbol, date) ascending. Window bounds are
/// inclusive.
#[async_trait]
pub trait PriceStore: Send + Sync {
    /// Whether an instrument with this symbol is registered.
    async fn instrument_exists(&self, symbol: &str) -> Result<bool, AnalyticsError>;

    /// All bars inside `window`, optionally restricted to one symbol.
    async fn list_bars(
        &self,
        symbol: Option<&str>,
        window: &DateWindow,
    ) -> Result<Vec<SymbolBar>, AnalyticsError>;
}

/// An in-process `PriceStore`.
///
/// Bars are keyed by (lower-cased symbol, date), so iteration order is the
/// order the trait requires and a second bar for the same day replaces the
/// first.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    instruments: BTreeSet<String>,
    bars: BTreeMap<(String, NaiveDate), PriceBar>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an instrument.
    pub fn add_instrument(&mut self, symbol: &str) -> &mut Self {
        self.instruments.insert(symbol.to_lowercase());
        self
    }

    /// Records a bar, registering the instrument if needed.
    pub fn add_bar(&mut self, symbol: &str, bar: PriceBar) -> &mut Self {
        let symbol = symbol.to_lowercase();
        self.instruments.insert(symbol.clone());
        self.bars.insert((symbol, bar.date), bar);
        self
    }

    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }
}

#[async_trait]
impl PriceStore for MemoryStore {
    async fn instrument_exists(&self, symbol: &str) -> Result<bool, AnalyticsError> {
        Ok(self.instruments.contains(&symbol.to_lowercase()))
    }

    async fn list_bars(
        &self,
        symbol: Option<&str>,
        window: &DateWindow,
    ) -> Result<Vec<SymbolBar>, AnalyticsError> {
        let wanted = symbol.map(str::to_lowercase);
        let bars = self
            .bars
            .iter()
            .filter(|((sym, date), _)| {
                window.contains(*date) && wanted.as_ref().is_none_or(|w| w == sym)
            })
            .map(|((sym, _), bar)| SymbolBar {
                symbol: sym.clone(),
                bar: bar.clone(),
            })
            .collect();
        Ok(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bar(day: u32, close: rust_decimal::Decimal) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2021, 6, day).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            adjusted_close: close,
            volume: 100,
        }
    }

    fn window(from: u32, to: u32) -> DateWindow {
        DateWindow::new(
            NaiveDate::from_ymd_opt(2021, 6, from).unwrap(),
            NaiveDate::from_ymd_opt(2021, 6, to).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn instruments_match_case_insensitively() {
        let mut store = MemoryStore::new();
        store.add_instrument("AbC");
        assert!(store.instrument_exists("abc").await.unwrap());
        assert!(store.instrument_exists("ABC").await.unwrap());
        assert!(!store.instrument_exists("ab").await.unwrap());
    }

    #[tokio::test]
    async fn bars_are_ordered_by_symbol_then_date() {
        let mut store = MemoryStore::new();
        store
            .add_bar("ZZZ", bar(2, dec!(1)))
            .add_bar("aaa", bar(3, dec!(2)))
            .add_bar("AAA", bar(1, dec!(3)));

        let bars = store.list_bars(None, &window(1, 30)).await.unwrap();
        let keys: Vec<_> = bars
            .iter()
            .map(|b| (b.symbol.as_str(), b.bar.date.format("%d").to_string()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("aaa", "01".to_string()),
                ("aaa", "03".to_string()),
                ("zzz", "02".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn window_bounds_are_inclusive_and_filter_applies() {
        let mut store = MemoryStore::new();
        for day in 1..=5 {
            store.add_bar("abc", bar(day, dec!(10)));
            store.add_bar("xyz", bar(day, dec!(20)));
        }

        let bars = store.list_bars(Some("ABC"), &window(2, 4)).await.unwrap();
        assert_eq!(bars.len(), 3);
        assert!(bars.iter().all(|b| b.symbol == "abc"));
    }

    #[test]
    fn one_bar_per_symbol_and_day() {
        let mut store = MemoryStore::new();
        store.add_bar("abc", bar(1, dec!(1)));
        store.add_bar("ABC", bar(1, dec!(2)));
        assert_eq!(store.bar_count(), 1);
    }
}
