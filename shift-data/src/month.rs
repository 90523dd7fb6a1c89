use chrono::{Months, NaiveDate};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected a month as YYYY-MM, got '{0}'")]
pub struct MonthParseError(pub String);

/// Parses a calendar month into the days it covers.
///
/// # Arguments
///
/// * `month` - The month as `YYYY-MM`; surrounding whitespace is ignored
///
/// # Returns
///
/// The half-open range `[first of month, first of next month)`.
///
/// # Errors
///
/// [`MonthParseError`] when `month` is not a valid `YYYY-MM` month.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use shift_data::month_range;
///
/// let (start, end) = month_range("2025-05").unwrap();
/// assert_eq!(start, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
/// assert_eq!(end, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
/// ```
pub fn month_range(month: &str) -> Result<(NaiveDate, NaiveDate), MonthParseError> {
    let invalid = || MonthParseError(month.to_string());

    let start = NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
        .map_err(|_| invalid())?;
    let end = start
        .checked_add_months(Months::new(1))
        .ok_or_else(invalid)?;

    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn month_range_wraps_year() {
        let (start, end) = month_range("2025-12").unwrap();

        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }

    #[test]
    fn month_range_rejects_bad_input() {
        assert_eq!(month_range("2025-13"), Err(MonthParseError("2025-13".to_string())));
        assert!(month_range("May 2025").is_err());
        assert!(month_range("2025-05-02").is_err());
    }
}
