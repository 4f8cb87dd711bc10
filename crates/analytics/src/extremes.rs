//! Window Extremes Finder: the single best buy (lowest low) and single best
//! sell (highest high) day inside a window.

use crate::error::AnalyticsError;
use crate::store::PriceStore;
use chrono::NaiveDate;
use core_types::{DateWindow, PriceBar};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A trading day (`YYYY-MM-DD` on the wire) and the close recorded on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub closing_price: Decimal,
}

/// The perfect single trade inside a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtremesResult {
    pub best_buying_price: PricePoint,
    pub best_selling_price: PricePoint,
    /// `best_selling_price.closing_price - best_buying_price.closing_price`,
    /// or `None` when the difference is not representable.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub profit: Option<Decimal>,
}

/// Total order for picking the buy day: `low` ascending, then `date` ascending.
fn buy_order(a: &PriceBar, b: &PriceBar) -> Ordering {
    a.low.cmp(&b.low).then_with(|| a.date.cmp(&b.date))
}

/// Total order for picking the sell day: `high` descending, then `date` ascending.
fn sell_order(a: &PriceBar, b: &PriceBar) -> Ordering {
    b.high.cmp(&a.high).then_with(|| a.date.cmp(&b.date))
}

/// Computes the extremes over an arbitrary set of bars for one symbol.
///
/// Returns `None` for an empty slice. The buy and sell day may be the same
/// bar.
pub fn find_extremes(bars: &[PriceBar]) -> Option<ExtremesResult> {
    let buy = bars.iter().min_by(|a, b| buy_order(a, b))?;
    let sell = bars.iter().min_by(|a, b| sell_order(a, b))?;

    Some(ExtremesResult {
        best_buying_price: PricePoint {
            date: buy.date,
            closing_price: buy.close,
        },
        best_selling_price: PricePoint {
            date: sell.date,
            closing_price: sell.close,
        },
        profit: sell.close.checked_sub(buy.close),
    })
}

/// Fetches `symbol`'s bars inside `window` and computes their extremes.
pub async fn find_window_extremes(
    store: &dyn PriceStore,
    symbol: &str,
    window: &DateWindow,
) -> Result<Option<ExtremesResult>, AnalyticsError> {
    let bars: Vec<PriceBar> = store
        .list_bars(Some(symbol), window)
        .await?
        .into_iter()
        .map(|b| b.bar)
        .collect();

    let result = find_extremes(&bars);
    tracing::debug!(%symbol, %window, bars = bars.len(), found = result.is_some(), "Window extremes computed.");
    Ok(result)
}
