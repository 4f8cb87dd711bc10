use crate::extremes::ExtremesResult;
use chrono::NaiveDate;
use core_types::Period;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The analysis of a single window: the perfect single trade next to the
/// unlimited-trades optimum. The two figures are different strategies and are
/// reported side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodAnalysis {
    #[serde(flatten)]
    pub extremes: ExtremesResult,
    #[serde(with = "rust_decimal::serde::float")]
    pub multy_trade_max_profit: Decimal,
}

/// Current window plus whichever adjacent windows had data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub current_period: PeriodAnalysis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_period: Option<PeriodAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_period: Option<PeriodAnalysis>,
}

impl Analysis {
    pub fn period(&self, period: Period) -> Option<&PeriodAnalysis> {
        match period {
            Period::Previous => self.previous_period.as_ref(),
            Period::Current => Some(&self.current_period),
            Period::Next => self.next_period.as_ref(),
        }
    }
}

/// The request echoed back with the report.
///
/// Dates serialize as plain calendar dates (`YYYY-MM-DD`), the same format the
/// request accepts, rather than as timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Upper-cased.
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// The composite result of a period comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub analysis: Analysis,
    /// Symbols whose current-window unlimited-trade profit beats the queried
    /// symbol's, in symbol order.
    pub higher_profit_symbols: Vec<String>,
    pub metadata: ReportMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn metadata_dates_are_calendar_dates() {
        let metadata = ReportMetadata {
            symbol: "AAPL".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        };
        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(
            value,
            json!({ "symbol": "AAPL", "start_date": "2024-01-01", "end_date": "2024-01-31" })
        );
    }
}
