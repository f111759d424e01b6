//! Australian financial year and calendar arithmetic.
//!
//! The Australian financial year runs from 1 July to 30 June. Every function
//! here is pure: results depend only on the dates passed in, never on the
//! wall clock.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::error::{EngineError, EngineResult, ErrorCode, ValidationError};

/// Month (1-based) in which the financial year starts.
pub const FY_START_MONTH: u32 = 7;

/// Start and end dates of a financial year, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinancialYearBounds {
    /// 1 July.
    pub start: NaiveDate,
    /// 30 June of the following calendar year.
    pub end: NaiveDate,
}

/// Returns the first day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// Returns 1 July of the financial year containing `date`.
///
/// # Examples
///
/// ```
/// use income_engine::calculation::fy_start;
/// use chrono::NaiveDate;
///
/// let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// assert_eq!(fy_start(date(2025, 2, 1)), date(2024, 7, 1));
/// assert_eq!(fy_start(date(2024, 7, 1)), date(2024, 7, 1));
/// assert_eq!(fy_start(date(2024, 6, 30)), date(2023, 7, 1));
/// ```
pub fn fy_start(date: NaiveDate) -> NaiveDate {
    month_start(date) - Months::new(months_since_fy_start(date))
}

/// Returns the start and end of the financial year containing `date`.
pub fn fy_bounds(date: NaiveDate) -> FinancialYearBounds {
    let start = fy_start(date);
    let end = start + Months::new(12) - Days::new(1);
    FinancialYearBounds { start, end }
}

/// Returns the signed number of days from `start` to `end`.
///
/// The start date is excluded from the count, so consecutive days are one
/// day apart. The result is negative when `end` precedes `start`.
///
/// # Examples
///
/// ```
/// use income_engine::calculation::days_between;
/// use chrono::NaiveDate;
///
/// let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// assert_eq!(days_between(date(2024, 9, 1), date(2025, 2, 1)), 153);
/// assert_eq!(days_between(date(2024, 7, 2), date(2024, 7, 1)), -1);
/// ```
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days()
}

/// Returns the whole calendar months from the FY start to `date`.
///
/// Only the month component is compared; the day of month is ignored.
pub fn months_since_fy_start(date: NaiveDate) -> u32 {
    (date.month0() + 12 - (FY_START_MONTH - 1)) % 12
}

/// Adds `months` calendar months to `date`, clipping the day to the
/// length of the target month.
///
/// # Examples
///
/// ```
/// use income_engine::calculation::add_months;
/// use chrono::NaiveDate;
///
/// let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// assert_eq!(add_months(date(2024, 7, 1), 6), date(2025, 1, 1));
/// assert_eq!(add_months(date(2024, 8, 31), 1), date(2024, 9, 30));
/// assert_eq!(add_months(date(2024, 12, 1), -6), date(2024, 6, 1));
/// ```
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let delta = Months::new(months.unsigned_abs());
    if months >= 0 { date + delta } else { date - delta }
}

/// Returns true if both dates fall in the same financial year.
pub fn is_within_same_fy(first: NaiveDate, second: NaiveDate) -> bool {
    fy_start(first) == fy_start(second)
}

/// Parses a strict `YYYY-MM-DD` date.
///
/// `field` names the input in the returned error.
pub fn parse_date(field: &str, raw: &str) -> EngineResult<NaiveDate> {
    let invalid = || EngineError::InvalidInput {
        errors: vec![ValidationError::new(
            field,
            ErrorCode::InvalidDateFormat,
            format!("Date field '{}' must be in YYYY-MM-DD format", field),
            raw,
        )],
    };

    if raw.len() != 10 {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid())
}
