//! Interest-over-time table

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

/// One date of an interest-over-time table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendsRow {
    /// The date this row covers.
    pub date: NaiveDate,
    /// Interest scores (0-100), one per keyword, in keyword order.
    pub values: Vec<u8>,
    /// The provider marks the most recent period as partial while it is
    /// still being collected.
    pub is_partial: bool,
}

/// Interest-over-time table: one row per date, one column per keyword.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use trends_lib::model::{TrendsResult, TrendsRow};
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let table = TrendsResult::new(
///     vec!["cat".into(), "dog".into()],
///     vec![TrendsRow { date, values: vec![80, 45], is_partial: false }],
/// );
///
/// assert_eq!(table.to_csv(), "date,cat,dog\n2024-01-01,80,45\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendsResult {
    keywords: Vec<String>,
    rows: Vec<TrendsRow>,
}

impl TrendsResult {
    /// Creates a new table.
    pub fn new(keywords: Vec<String>, rows: Vec<TrendsRow>) -> Self {
        Self { keywords, rows }
    }

    /// The keyword columns, in query order.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// The rows, ordered by date.
    pub fn rows(&self) -> &[TrendsRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns a copy of the table without partial rows.
    pub fn without_partial(&self) -> Self {
        Self {
            keywords: self.keywords.clone(),
            rows: self.rows.iter().filter(|r| !r.is_partial).cloned().collect(),
        }
    }

    /// Returns the `(date, score)` series of one keyword.
    pub fn series(&self, keyword: &str) -> Option<Vec<(NaiveDate, u8)>> {
        let index = self.keywords.iter().position(|k| k == keyword)?;
        Some(
            self.rows
                .iter()
                .filter_map(|row| row.values.get(index).map(|v| (row.date, *v)))
                .collect(),
        )
    }

    /// Renders the table as CSV with a `date,<keyword>...` header.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from("date");
        for keyword in &self.keywords {
            csv.push(',');
            csv.push_str(&csv_field(keyword));
        }
        csv.push('\n');

        for row in &self.rows {
            let _ = write!(csv, "{}", row.date.format("%Y-%m-%d"));
            for value in &row.values {
                let _ = write!(csv, ",{}", value);
            }
            csv.push('\n');
        }
        csv
    }
}

/// Quotes a CSV field when it contains a separator, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
