use crate::error::AnalyticsError;
use crate::extremes::{find_window_extremes, ExtremesResult};
use crate::profit::{max_profit_all, max_profit_for};
use crate::report::{Analysis, PeriodAnalysis, Report, ReportMetadata};
use crate::store::PriceStore;
use core_types::{DateWindow, Period};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Orchestrates the analysis of a requested window against the windows of
/// equal span immediately before and after it.
///
/// The comparator holds no per-request state; every call recomputes its
/// results from the store.
#[derive(Clone)]
pub struct PeriodComparator {
    store: Arc<dyn PriceStore>,
}

impl PeriodComparator {
    pub fn new(store: Arc<dyn PriceStore>) -> Self {
        Self { store }
    }

    /// Runs the full comparison for `symbol` over `[start_date, end_date]`.
    ///
    /// # Errors
    ///
    /// * `NotFound` if no instrument matches `symbol`, or the requested window
    ///   holds no bars for it.
    /// * `InvalidInput` if a date is not `YYYY-MM-DD`, `start_date >= end_date`,
    ///   or an adjacent window falls outside the representable date range.
    /// * `Store` if the price store fails.
    pub async fn analyze(
        &self,
        symbol: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Report, AnalyticsError> {
        if !self.store.instrument_exists(symbol).await? {
            return Err(AnalyticsError::NotFound(format!(
                "Stock with symbol '{symbol}' not found"
            )));
        }

        let current = DateWindow::parse(start_date, end_date)?;
        let previous = current.previous()?;
        let next = current.next()?;

        tracing::info!(%symbol, %current, %previous, %next, "Analyzing periods.");

        let (current_extremes, previous_extremes, next_extremes) = tokio::try_join!(
            self.evaluate(symbol, &current),
            self.evaluate(symbol, &previous),
            self.evaluate(symbol, &next),
        )?;

        let current_period = current_extremes.ok_or_else(|| {
            AnalyticsError::NotFound("There is no record for the selected period".to_string())
        })?;

        let all_profits = max_profit_all(self.store.as_ref(), &current).await?;
        let higher_profit_symbols =
            all_profits.symbols_above(current_period.multy_trade_max_profit);

        if previous_extremes.is_none() {
            tracing::debug!(%symbol, period = %Period::Previous, "No bars; period omitted.");
        }
        if next_extremes.is_none() {
            tracing::debug!(%symbol, period = %Period::Next, "No bars; period omitted.");
        }

        Ok(Report {
            analysis: Analysis {
                current_period,
                previous_period: previous_extremes,
                next_period: next_extremes,
            },
            higher_profit_symbols,
            metadata: ReportMetadata {
                symbol: symbol.to_uppercase(),
                start_date: current.start,
                end_date: current.end,
            },
        })
    }

    /// Extremes and single-symbol profit for one window, queried concurrently.
    async fn evaluate(
        &self,
        symbol: &str,
        window: &DateWindow,
    ) -> Result<Option<PeriodAnalysis>, AnalyticsError> {
        let store = self.store.as_ref();
        let (extremes, profit): (Option<ExtremesResult>, Decimal) = tokio::try_join!(
            find_window_extremes(store, symbol, window),
            max_profit_for(store, window, symbol),
        )?;

        Ok(extremes.map(|extremes| PeriodAnalysis {
            extremes,
            multy_trade_max_profit: profit,
        }))
    }
}
