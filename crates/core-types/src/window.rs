use crate::error::CoreError;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(input: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| CoreError::InvalidDateFormat(input.to_string()))
}

/// An inclusive range of calendar days `[start, end]`.
///
/// Windows built from user input through [`DateWindow::new`] or
/// [`DateWindow::parse`] always satisfy `start < end`. The adjacent windows
/// derived by [`DateWindow::previous`] and [`DateWindow::next`] keep the same
/// span, so for a one-day span they collapse to a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Creates a window, rejecting `start >= end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if start >= end {
            return Err(CoreError::NonChronologicalRange);
        }
        Ok(Self { start, end })
    }

    /// Parses both bounds from `YYYY-MM-DD` text. Format errors are reported
    /// before the ordering check.
    pub fn parse(start: &str, end: &str) -> Result<Self, CoreError> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        Self::new(start, end)
    }

    /// `end - start`.
    pub fn span(&self) -> Duration {
        self.end - self.start
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// `[start - span, start - 1 day]`
    pub fn previous(&self) -> Result<Self, CoreError> {
        let start = self
            .start
            .checked_sub_signed(self.span())
            .ok_or(CoreError::DateOutOfRange)?;
        let end = self
            .start
            .checked_sub_signed(Duration::days(1))
            .ok_or(CoreError::DateOutOfRange)?;
        Ok(Self { start, end })
    }

    /// `[end + 1 day, end + span]`
    pub fn next(&self) -> Result<Self, CoreError> {
        let start = self
            .end
            .checked_add_signed(Duration::days(1))
            .ok_or(CoreError::DateOutOfRange)?;
        let end = self
            .end
            .checked_add_signed(self.span())
            .ok_or(CoreError::DateOutOfRange)?;
        Ok(Self { start, end })
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}
