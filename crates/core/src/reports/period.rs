//! Reporting period validation and filtering.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::ReportError;

/// Inclusive date range a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    /// First day covered.
    pub start: NaiveDate,
    /// Last day covered.
    pub end: NaiveDate,
}

impl ReportPeriod {
    /// Creates a period, rejecting ranges whose start falls after their end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Period covering a single day.
    #[must_use]
    pub const fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// Returns true if the date falls within the period, bounds included.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Keeps the rows dated within the period.
    ///
    /// Rows without a date are kept. The desks treat an undated row as
    /// belonging to the requested window rather than silently dropping it.
    #[must_use]
    pub fn filter<T: Dated>(&self, rows: Vec<T>) -> Vec<T> {
        rows.into_iter()
            .filter(|row| row.report_date().is_none_or(|date| self.contains(date)))
            .collect()
    }
}

/// Row types carrying a reporting date.
pub trait Dated {
    /// The date the row belongs to, when it has one.
    fn report_date(&self) -> Option<NaiveDate>;
}
