//! Multi-Trade Profit Calculator.
//!
//! The unlimited round-trip optimum over daily closes is the sum of every
//! positive close-to-close delta, computed per symbol in one linear pass.

use crate::error::AnalyticsError;
use crate::store::PriceStore;
use core_types::{DateWindow, SymbolBar};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

fn overflow(symbol: &str, close: Decimal) -> AnalyticsError {
    AnalyticsError::Store(format!(
        "profit arithmetic overflowed for '{symbol}' at close {close}"
    ))
}

/// Running totals for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfitEntry {
    pub cumulative_profit: Decimal,
    pub last_close: Decimal,
}

/// Per-symbol accumulator, keyed by lower-cased symbol.
///
/// Iteration is in symbol order, which is also the order a store returns an
/// unfiltered scan in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfitMap {
    entries: BTreeMap<String, ProfitEntry>,
}

impl ProfitMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one close. The first close of a symbol only seeds `last_close`.
    ///
    /// Fails if a delta or the running total leaves the `Decimal` range.
    pub fn record(&mut self, symbol: &str, close: Decimal) -> Result<(), AnalyticsError> {
        let key = symbol.to_lowercase();
        match self.entries.get_mut(&key) {
            Some(entry) => {
                let delta = close
                    .checked_sub(entry.last_close)
                    .ok_or_else(|| overflow(&key, close))?;
                if delta > Decimal::ZERO {
                    entry.cumulative_profit = entry
                        .cumulative_profit
                        .checked_add(delta)
                        .ok_or_else(|| overflow(&key, close))?;
                }
                entry.last_close = close;
            }
            None => {
                self.entries.insert(
                    key,
                    ProfitEntry {
                        cumulative_profit: Decimal::ZERO,
                        last_close: close,
                    },
                );
            }
        }
        Ok(())
    }

    /// Builds the map from bars ordered by (symbol, date).
    pub fn from_bars<'a>(
        bars: impl IntoIterator<Item = &'a SymbolBar>,
    ) -> Result<Self, AnalyticsError> {
        let mut map = Self::new();
        for item in bars {
            map.record(&item.symbol, item.bar.close)?;
        }
        Ok(map)
    }

    /// The accumulated profit of `symbol`, zero if it had no bars.
    pub fn profit_for(&self, symbol: &str) -> Decimal {
        self.entries
            .get(&symbol.to_lowercase())
            .map(|e| e.cumulative_profit)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn get(&self, symbol: &str) -> Option<&ProfitEntry> {
        self.entries.get(&symbol.to_lowercase())
    }

    /// Symbols whose profit is strictly greater than `threshold`, in map order.
    pub fn symbols_above(&self, threshold: Decimal) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, e)| e.cumulative_profit > threshold)
            .map(|(sym, _)| sym.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProfitEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The unlimited-trade profit of one symbol inside `window`.
pub async fn max_profit_for(
    store: &dyn PriceStore,
    window: &DateWindow,
    symbol: &str,
) -> Result<Decimal, AnalyticsError> {
    let bars = store.list_bars(Some(symbol), window).await?;
    Ok(ProfitMap::from_bars(&bars)?.profit_for(symbol))
}

/// The unlimited-trade profit of every symbol with bars inside `window`.
pub async fn max_profit_all(
    store: &dyn PriceStore,
    window: &DateWindow,
) -> Result<ProfitMap, AnalyticsError> {
    let bars = store.list_bars(None, window).await?;
    let map = ProfitMap::from_bars(&bars)?;
    tracing::debug!(%window, bars = bars.len(), symbols = map.len(), "Profit scan complete.");
    Ok(map)
}
