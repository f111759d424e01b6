//! Pay-cycle annualization.
//!
//! Converts the days elapsed in the current financial year into a whole
//! number of pay cycles at the applicant's salary frequency, and annualizes
//! a per-cycle base salary.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::config::BusinessConstants;
use crate::models::SalaryFrequency;

use super::common::fractional_part;
use super::financial_year::{days_between, fy_start};

/// The pay cycles elapsed in the current financial year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayCycleCount {
    /// The later of employment start and the FY start.
    pub counted_from: NaiveDate,
    /// Days from `counted_from` to the payslip end date.
    pub elapsed_days: i64,
    /// Unrounded cycle count.
    pub raw_cycles: Decimal,
    /// Cycle count after frequency-specific rounding, floored at zero.
    pub count: u32,
}

/// Returns the base salary annualized by the salary frequency.
///
/// Income types without a base salary always annualize to zero.
///
/// # Examples
///
/// ```
/// use income_engine::calculation::annual_base_salary;
/// use income_engine::models::SalaryFrequency;
/// use rust_decimal::Decimal;
///
/// let base = Decimal::from(2000);
/// assert_eq!(
///     annual_base_salary(Some(base), SalaryFrequency::Monthly, true),
///     Decimal::from(24000)
/// );
/// assert_eq!(
///     annual_base_salary(Some(base), SalaryFrequency::Monthly, false),
///     Decimal::ZERO
/// );
/// ```
pub fn annual_base_salary(
    base_income: Option<Decimal>,
    frequency: SalaryFrequency,
    has_base_income: bool,
) -> Decimal {
    match base_income {
        Some(base) if has_base_income => base * frequency.multiplier(),
        _ => Decimal::ZERO,
    }
}

/// Rounds a raw pay-cycle count for the given frequency.
///
/// MONTHLY rounds up only when the fractional part exceeds `monthly_threshold`
/// and otherwise rounds down. WEEKLY and FORTNIGHTLY always round up.
/// Negative counts floor at zero.
pub fn round_pay_cycles(
    raw_cycles: Decimal,
    frequency: SalaryFrequency,
    monthly_threshold: Decimal,
) -> u32 {
    if raw_cycles <= Decimal::ZERO {
        return 0;
    }

    let rounded = match frequency {
        SalaryFrequency::Monthly => {
            if fractional_part(raw_cycles) > monthly_threshold {
                raw_cycles.ceil()
            } else {
                raw_cycles.floor()
            }
        }
        SalaryFrequency::Weekly | SalaryFrequency::Fortnightly => raw_cycles.ceil(),
    };

    rounded.to_u32().unwrap_or(0)
}

/// Counts the pay cycles elapsed in the FY containing the payslip end date.
///
/// Counting starts at the later of the employment start date and 1 July.
/// The day count is converted as `days * cycles_per_year / days_in_year`.
///
/// # Arguments
///
/// * `employment_start_date` - Date employment started
/// * `end_date_latest_payslip` - End date of the latest payslip
/// * `frequency` - The applicant's salary frequency
/// * `constants` - Shared thresholds (year length, MONTHLY rounding threshold)
///
/// # Examples
///
/// ```
/// use income_engine::calculation::count_pay_cycles;
/// use income_engine::config::BusinessConstants;
/// use income_engine::models::SalaryFrequency;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let cycles = count_pay_cycles(start, end, SalaryFrequency::Monthly, &BusinessConstants::default());
/// assert_eq!(cycles.elapsed_days, 335);
/// assert_eq!(cycles.count, 11);
/// ```
pub fn count_pay_cycles(
    employment_start_date: NaiveDate,
    end_date_latest_payslip: NaiveDate,
    frequency: SalaryFrequency,
    constants: &BusinessConstants,
) -> PayCycleCount {
    let counted_from = employment_start_date.max(fy_start(end_date_latest_payslip));
    let elapsed_days = days_between(counted_from, end_date_latest_payslip);

    let raw_cycles = if constants.days_in_year > 0 {
        Decimal::from(elapsed_days) * frequency.multiplier() / Decimal::from(constants.days_in_year)
    } else {
        Decimal::ZERO
    };

    PayCycleCount {
        counted_from,
        elapsed_days,
        raw_cycles,
        count: round_pay_cycles(raw_cycles, frequency, constants.monthly_rounding_threshold),
    }
}
