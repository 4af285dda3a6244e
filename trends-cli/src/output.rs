//! Terminal rendering of results.

use std::fmt::Write as _;

use trends_lib::CacheStatus;
use trends_lib::model::COUNTRIES;
use trends_lib::model::RelatedQueries;
use trends_lib::model::RelatedQuery;
use trends_lib::model::TrendsResult;
use trends_lib::query::Warning;

const DATE_WIDTH: usize = 10;

/// Renders the table with one right-aligned column per keyword.
/// Partial rows are marked with `*`.
pub fn render_table(table: &TrendsResult) -> String {
    let widths: Vec<usize> = table
        .keywords()
        .iter()
        .map(|k| k.chars().count().max(3))
        .collect();

    let mut out = format!("{:<DATE_WIDTH$}", "date");
    for (keyword, width) in table.keywords().iter().zip(&widths) {
        let _ = write!(out, "  {:>width$}", keyword, width = width);
    }
    out.push('\n');

    let mut any_partial = false;
    for row in table.rows() {
        let _ = write!(out, "{:<DATE_WIDTH$}", row.date.format("%Y-%m-%d").to_string());
        for (value, width) in row.values.iter().zip(&widths) {
            let _ = write!(out, "  {:>width$}", value, width = width);
        }
        if row.is_partial {
            any_partial = true;
            out.push_str(" *");
        }
        out.push('\n');
    }

    if any_partial {
        out.push_str("* partial data\n");
    }
    out
}

pub fn render_related(related: &RelatedQueries) -> String {
    let mut out = String::new();
    render_ranked(&mut out, &format!("Top queries for \"{}\"", related.keyword), &related.top);
    out.push('\n');
    render_ranked(&mut out, "Rising queries", &related.rising);
    out
}

fn render_ranked(out: &mut String, title: &str, queries: &[RelatedQuery]) {
    let _ = writeln!(out, "{}", title);
    if queries.is_empty() {
        out.push_str("  (none)\n");
    }
    for (rank, query) in queries.iter().enumerate() {
        let _ = writeln!(out, "{:>4}. {} ({})", rank + 1, query.query, query.formatted_value);
    }
}

/// Normalization warnings, one `warning:` line each.
pub fn render_warnings(warnings: &[Warning]) -> String {
    warnings
        .iter()
        .map(|w| format!("warning: {}\n", w))
        .collect()
}

pub fn render_countries() -> String {
    COUNTRIES
        .iter()
        .map(|c| format!("{}  {}\n", c.code, c.name))
        .collect()
}

/// One line describing where the data came from.
pub fn describe_cache(status: &CacheStatus) -> Option<String> {
    match status {
        CacheStatus::Hit { cached_at, .. } => Some(format!(
            "(cached result from {})",
            cached_at.format("%Y-%m-%d %H:%M:%S UTC")
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use trends_lib::model::TrendsRow;

    use super::*;

    #[test]
    fn test_render_table() {
        let table = TrendsResult::new(
            vec!["cat".into(), "hamster".into()],
            vec![
                TrendsRow {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    values: vec![80, 5],
                    is_partial: false,
                },
                TrendsRow {
                    date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
                    values: vec![100, 12],
                    is_partial: true,
                },
            ],
        );

        assert_eq!(
            render_table(&table),
            concat!(
                "date        cat  hamster\n",
                "2024-01-01   80        5\n",
                "2024-01-08  100       12 *\n",
                "* partial data\n",
            )
        );
    }

    #[test]
    fn test_render_warnings() {
        let warnings = [Warning::TooManyKeywords {
            supplied: 6,
            kept: 5,
        }];
        assert_eq!(
            render_warnings(&warnings),
            "warning: At most 5 keywords are allowed (6 supplied). Only the first 5 are used.\n"
        );
        assert_eq!(render_warnings(&[]), "");
    }

    #[test]
    fn test_render_countries() {
        let listing = render_countries();
        assert!(listing.starts_with("FR  France\n"));
        assert_eq!(listing.lines().count(), COUNTRIES.len());
    }

    #[test]
    fn test_render_related_empty_lists() {
        let related = RelatedQueries {
            keyword: "cat".to_string(),
            ..Default::default()
        };
        assert_eq!(
            render_related(&related),
            "Top queries for \"cat\"\n  (none)\n\nRising queries\n  (none)\n"
        );
    }
}
