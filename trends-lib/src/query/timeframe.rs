//! Provider date-range expression

use chrono::NaiveDate;

/// A closed date range, rendered for the provider as `"YYYY-MM-DD YYYY-MM-DD"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timeframe {
    start: NaiveDate,
    end: NaiveDate,
}

impl Timeframe {
    pub(crate) fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// First day of the range.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days between start and end.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}
