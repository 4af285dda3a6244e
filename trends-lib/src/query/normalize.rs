//! Query validation

use chrono::NaiveDate;
use chrono::Utc;

use super::MAX_KEYWORDS;
use super::MAX_SPAN_DAYS;
use super::Query;
use super::Timeframe;
use super::Warning;
use crate::error::ValidationError;

/// Validates raw input into a [`Query`], using today's UTC date as the upper
/// bound of the range.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use trends_lib::query::normalize;
///
/// let query = normalize(
///     &["cat", " dog "],
///     "fr",
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(query.keywords(), ["cat", "dog"]);
/// assert_eq!(query.country(), "FR");
/// assert_eq!(query.timeframe().to_string(), "2024-01-01 2024-03-31");
/// ```
pub fn normalize<S: AsRef<str>>(
    keywords: &[S],
    country: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Query, ValidationError> {
    normalize_at(keywords, country, start, end, Utc::now().date_naive())
}

/// Same as [`normalize`] with an explicit "today".
pub fn normalize_at<S: AsRef<str>>(
    keywords: &[S],
    country: &str,
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> Result<Query, ValidationError> {
    let mut keywords: Vec<String> = keywords
        .iter()
        .map(|k| k.as_ref().trim())
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect();

    if keywords.is_empty() {
        return Err(ValidationError::Empty);
    }

    let mut warnings = Vec::new();
    if keywords.len() > MAX_KEYWORDS {
        warnings.push(Warning::TooManyKeywords {
            supplied: keywords.len(),
            kept: MAX_KEYWORDS,
        });
        keywords.truncate(MAX_KEYWORDS);
    }

    let timeframe = validate_range(start, end, today)?;

    Ok(Query {
        keywords,
        country: country.trim().to_ascii_uppercase(),
        timeframe,
        warnings,
    })
}

fn validate_range(
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> Result<Timeframe, ValidationError> {
    if start > end {
        return Err(ValidationError::invalid_range(format!(
            "start date {} is after end date {}",
            start, end
        )));
    }
    if end > today {
        return Err(ValidationError::invalid_range(format!(
            "end date {} is in the future",
            end
        )));
    }

    let timeframe = Timeframe::new(start, end);
    if timeframe.span_days() > MAX_SPAN_DAYS {
        return Err(ValidationError::invalid_range(format!(
            "range spans {} days, at most {} are allowed",
            timeframe.span_days(),
            MAX_SPAN_DAYS
        )));
    }

    Ok(timeframe)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn today() -> NaiveDate {
        d(2024, 6, 1)
    }

    #[test]
    fn test_scenario_cat_dog() {
        let query =
            normalize_at(&["cat", "dog"], "FR", d(2024, 1, 1), d(2024, 3, 31), today()).unwrap();
        let swapped =
            normalize_at(&["dog", "cat"], "FR", d(2024, 1, 1), d(2024, 3, 31), today()).unwrap();

        assert_eq!(query.timeframe().to_string(), "2024-01-01 2024-03-31");
        assert_eq!(query.cache_key(), swapped.cache_key());
        assert!(query.warnings().is_empty());
    }

    #[test]
    fn test_trims_and_drops_blanks() {
        let query = normalize_at(
            &["  cat ", "", "   ", "dog"],
            " fr ",
            d(2024, 1, 1),
            d(2024, 1, 31),
            today(),
        )
        .unwrap();
        assert_eq!(query.keywords(), ["cat", "dog"]);
        assert_eq!(query.country(), "FR");
    }

    #[test]
    fn test_keeps_duplicates() {
        let query =
            normalize_at(&["cat", "cat"], "FR", d(2024, 1, 1), d(2024, 1, 31), today()).unwrap();
        assert_eq!(query.keywords(), ["cat", "cat"]);
    }

    #[test]
    fn test_empty_keywords() {
        let blank: [&str; 2] = [" ", ""];
        assert_eq!(
            normalize_at(&blank, "FR", d(2024, 1, 1), d(2024, 1, 31), today()),
            Err(ValidationError::Empty)
        );
        let none: [&str; 0] = [];
        assert_eq!(
            normalize_at(&none, "FR", d(2024, 1, 1), d(2024, 1, 31), today()),
            Err(ValidationError::Empty)
        );
    }

    #[test]
    fn test_truncates_to_five_with_warning() {
        let keywords = ["a", "b", "c", "d", "e", "f", "g"];
        let query = normalize_at(&keywords, "FR", d(2024, 1, 1), d(2024, 1, 31), today()).unwrap();

        assert_eq!(query.keywords(), ["a", "b", "c", "d", "e"]);
        assert_eq!(
            query.warnings(),
            [Warning::TooManyKeywords {
                supplied: 7,
                kept: 5
            }]
        );
    }

    #[test]
    fn test_start_after_end() {
        let result = normalize_at(&["cat"], "FR", d(2024, 2, 1), d(2024, 1, 1), today());
        assert!(matches!(result, Err(ValidationError::InvalidRange { .. })));
    }

    #[test]
    fn test_end_in_future() {
        let result = normalize_at(&["cat"], "FR", d(2024, 5, 1), d(2024, 6, 2), today());
        assert!(matches!(result, Err(ValidationError::InvalidRange { .. })));
    }

    #[test]
    fn test_span_limit() {
        // 2023-06-01..2024-05-31 is 365 days (leap day included)
        assert!(normalize_at(&["cat"], "FR", d(2023, 6, 1), d(2024, 5, 31), today()).is_ok());
        assert!(matches!(
            normalize_at(&["cat"], "FR", d(2023, 5, 31), d(2024, 5, 31), today()),
            Err(ValidationError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_single_day_range() {
        let query = normalize_at(&["cat"], "FR", today(), today(), today()).unwrap();
        assert_eq!(query.timeframe().span_days(), 0);
    }
}
