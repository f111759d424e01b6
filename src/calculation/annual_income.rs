//! Annual-comparison income: BONUS and INVESTMENT.
//!
//! These types have no pay cycles or base salary. The amount is either the
//! current financial year figure or, conservatively, the two-year average
//! capped at the current year.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{AnnualIncome, CalculationDetails, IncomeResult, IncomeType};
use crate::validation::{AnnualBasis, check_non_negative, validate_annual_income};

/// Returns the lesser of the two-year average and the current year.
///
/// # Examples
///
/// ```
/// use income_engine::calculation::capped_two_year_average;
/// use rust_decimal::Decimal;
///
/// let current = Decimal::from(30000);
/// let last = Decimal::from(60000);
/// assert_eq!(capped_two_year_average(current, last), current);
/// assert_eq!(capped_two_year_average(last, current), Decimal::from(45000));
/// ```
pub fn capped_two_year_average(current_fy: Decimal, last_fy: Decimal) -> Decimal {
    ((current_fy + last_fy) / Decimal::from(2)).min(current_fy)
}

/// Name under which a negative annual-comparison amount is reported.
pub fn annual_calculation_type(income_type: IncomeType) -> &'static str {
    match income_type {
        IncomeType::Bonus => "bonusCalculation",
        _ => "investmentCalculation",
    }
}

/// Calculates a BONUS or INVESTMENT income.
///
/// The result is always eligible; no employment-duration rule applies.
///
/// # Errors
///
/// Returns `EngineError::BusinessRule` for an unsuitable verification
/// method, a two-year bonus without a prior-FY bonus, or a negative amount.
pub fn calculate_annual_income(income: &AnnualIncome) -> EngineResult<IncomeResult> {
    let basis = validate_annual_income(income)?;

    let amount = match basis {
        AnnualBasis::CurrentYear => income.current_fy,
        AnnualBasis::TwoYearAverage { last_fy } => capped_two_year_average(income.current_fy, last_fy),
    };
    check_non_negative(annual_calculation_type(income.income_type), amount)?;

    debug!(
        income_type = %income.income_type,
        basis = ?basis,
        amount = %amount.round_dp(2),
        "Calculated annual income"
    );

    Ok(IncomeResult::eligible(
        amount,
        CalculationDetails::for_annual_amount(amount),
    ))
}
