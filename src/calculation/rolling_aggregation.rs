//! Rolling-window aggregation across the financial year boundary.
//!
//! The window covers the `N` calendar months ending with the month before the
//! payslip's month. Months inside the payslip's financial year contribute the
//! uniform monthly rate derived from the payslip; months before it contribute
//! the prior-year income less base salary, spread evenly over twelve months.
//! A single prior-year figure is used for every prior-year month, however far
//! back the window reaches.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use super::financial_year::{fy_start, month_start};

/// Which financial year a window month belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiscalPeriod {
    /// The financial year containing the payslip end date.
    Current,
    /// Any earlier financial year.
    Prior,
}

/// One month's contribution to the rolling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthContribution {
    /// First day of the month.
    pub month: NaiveDate,
    /// Financial year classification of the month.
    pub period: FiscalPeriod,
    /// Amount contributed by the month.
    pub amount: Decimal,
}

/// Inputs to the rolling aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingWindowInput {
    /// End date of the latest payslip.
    pub end_date_latest_payslip: NaiveDate,
    /// Number of months in the window.
    pub window_months: u32,
    /// Monthly variable income derived from the current-FY payslip.
    pub monthly_amount: Decimal,
    /// Annualized base salary, subtracted from prior-FY income.
    pub annual_base_salary: Decimal,
    /// Total income for the prior financial year, if supplied.
    pub last_fy_annual_income: Option<Decimal>,
}

/// The outcome of a rolling aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollingAggregation {
    /// Month-by-month contributions, oldest first.
    pub months: Vec<MonthContribution>,
    /// Sum of all contributions.
    pub total: Decimal,
    /// The total annualized: `total * 12 / N`.
    pub annualized: Decimal,
}

impl RollingAggregation {
    /// Counts the window months falling in the given period.
    pub fn months_in(&self, period: FiscalPeriod) -> usize {
        self.months
            .iter()
            .filter(|contribution| contribution.period == period)
            .count()
    }
}

/// Returns the monthly figure contributed by each prior-FY month.
///
/// Prior-FY income below the annual base salary contributes nothing.
pub fn prior_fy_monthly_amount(
    last_fy_annual_income: Option<Decimal>,
    annual_base_salary: Decimal,
) -> Decimal {
    last_fy_annual_income
        .map(|income| (income - annual_base_salary).max(Decimal::ZERO) / Decimal::from(12))
        .unwrap_or(Decimal::ZERO)
}

/// Aggregates the trailing window and annualizes the result.
///
/// # Examples
///
/// ```
/// use income_engine::calculation::{aggregate_rolling_window, RollingWindowInput};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let aggregation = aggregate_rolling_window(&RollingWindowInput {
///     end_date_latest_payslip: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
///     window_months: 6,
///     monthly_amount: Decimal::from(15600),
///     annual_base_salary: Decimal::from(24000),
///     last_fy_annual_income: Some(Decimal::from(150000)),
/// });
/// assert_eq!(aggregation.total, Decimal::from(88500));
/// assert_eq!(aggregation.annualized, Decimal::from(177000));
/// ```
pub fn aggregate_rolling_window(input: &RollingWindowInput) -> RollingAggregation {
    let window_months = input.window_months.max(1);
    let current_fy_start = fy_start(input.end_date_latest_payslip);
    let payslip_month = month_start(input.end_date_latest_payslip);
    let prior_amount =
        prior_fy_monthly_amount(input.last_fy_annual_income, input.annual_base_salary);

    let months: Vec<MonthContribution> = (1..=window_months)
        .rev()
        .map(|offset| {
            let month = payslip_month - Months::new(offset);
            if month >= current_fy_start {
                MonthContribution {
                    month,
                    period: FiscalPeriod::Current,
                    amount: input.monthly_amount,
                }
            } else {
                MonthContribution {
                    month,
                    period: FiscalPeriod::Prior,
                    amount: prior_amount,
                }
            }
        })
        .collect();

    let total: Decimal = months.iter().map(|contribution| contribution.amount).sum();
    let annualized = total * Decimal::from(12) / Decimal::from(window_months);

    RollingAggregation {
        months,
        total,
        annualized,
    }
}
