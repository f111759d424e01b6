//! The unified employment-income pipeline.
//!
//! OVERTIME, CASUAL, CONTRACT_VARIABLE and COMMISSIONS share one formula,
//! parametrized by their [`IncomeCalculationConfig`]. Validation runs first
//! and aborts on the first broken rule, except for an employment-duration
//! shortfall which yields [`Assessment::IneligibleDueToDuration`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{BusinessConstants, IncomeCalculationConfig};
use crate::error::{EngineResult, ValidationError};
use crate::models::{Assessment, CalculationDetails, EmploymentIncome, IncomeResult};
use crate::validation::{
    DurationGate, check_non_negative, check_pay_cycles, validate_employment_income,
};

use super::pay_cycles::{annual_base_salary, count_pay_cycles};
use super::priority::{TierCandidates, resolve_priority};
use super::rolling_aggregation::{RollingWindowInput, aggregate_rolling_window};

/// Name under which a negative annual variable component is reported.
pub const LESS_BASE_ANNUAL_CALCULATION: &str = "averageAmountLessBaseIncomeAnnual";

/// Assesses an employment-based income.
///
/// This function:
/// 1. Validates the request (combination, dates, duration, prior-FY income)
/// 2. Annualizes the base salary and counts elapsed pay cycles
/// 3. Derives the average variable component per cycle, year and month
/// 4. Replaces the annual figure with the rolling-window aggregate when the
///    income type has a window
/// 5. Resolves the final amount through the priority tiers
///
/// # Arguments
///
/// * `income` - The flattened employment request
/// * `config` - Calculation configuration for the income type
/// * `constants` - Shared business thresholds
/// * `today` - The date future-dated fields are compared against
///
/// # Errors
///
/// Returns `EngineError::BusinessRule` for any broken rule other than the
/// employment-duration minimum.
pub fn assess_employment_income(
    income: &EmploymentIncome,
    config: &IncomeCalculationConfig,
    constants: &BusinessConstants,
    today: NaiveDate,
) -> EngineResult<Assessment> {
    if let DurationGate::InsufficientDuration { days } =
        validate_employment_income(income, config, constants, today)?
    {
        let shortfall =
            ValidationError::insufficient_employment_duration(days, constants.minimum_employment_days);
        debug!(
            income_type = %income.income_type,
            code = %shortfall.code,
            message = %shortfall.message,
            "Income assessed as ineligible"
        );
        return Ok(Assessment::IneligibleDueToDuration {
            duration_days: days,
        });
    }

    let frequency = income.salary_frequency;
    let multiplier = frequency.multiplier();
    let base_income = if config.has_base_income {
        income.base_income.unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    // Step 1: Annual base salary and pay cycles
    let annual_base = annual_base_salary(income.base_income, frequency, config.has_base_income);
    let cycles = count_pay_cycles(
        income.employment_start_date,
        income.end_date_latest_payslip,
        frequency,
        constants,
    );
    check_pay_cycles(
        cycles.count,
        income.end_date_latest_payslip,
        income.employment_start_date,
    )?;

    debug!(
        income_type = %income.income_type,
        counted_from = %cycles.counted_from,
        elapsed_days = cycles.elapsed_days,
        raw_cycles = %cycles.raw_cycles.round_dp(4),
        pay_cycles = cycles.count,
        "Counted pay cycles"
    );

    // Step 2: Averages
    let pay_cycle_count = Decimal::from(cycles.count);
    let expected_ytd_base = base_income * pay_cycle_count;
    let average_per_cycle = income.ytd_amount_latest_payslip / pay_cycle_count;
    let less_base_annual = (average_per_cycle - base_income) * multiplier;
    check_non_negative(LESS_BASE_ANNUAL_CALCULATION, less_base_annual)?;
    let less_base_monthly = less_base_annual / Decimal::from(12);

    // Step 3: Rolling window
    let calculated = match config.rolling_window_months {
        Some(window_months) => {
            let aggregation = aggregate_rolling_window(&RollingWindowInput {
                end_date_latest_payslip: income.end_date_latest_payslip,
                window_months,
                monthly_amount: less_base_monthly,
                annual_base_salary: annual_base,
                last_fy_annual_income: income.last_fy_annual_income,
            });
            debug!(
                income_type = %income.income_type,
                window_months,
                total = %aggregation.total.round_dp(2),
                annualized = %aggregation.annualized.round_dp(2),
                "Aggregated rolling window"
            );
            aggregation.annualized
        }
        None => less_base_annual,
    };

    // Step 4: Priority tiers
    let resolution = resolve_priority(
        &config.priority_tiers,
        &TierCandidates {
            actual_ytd: income.actual_ytd_commission,
            override_amount: income.annual_override_amount,
            calculated,
        },
    );

    debug!(
        income_type = %income.income_type,
        tier = ?resolution.tier,
        amount = %resolution.amount.round_dp(2),
        "Resolved priority tier"
    );

    let details = CalculationDetails {
        annual_base_salary: annual_base,
        expected_ytd_base_salary: expected_ytd_base,
        pay_cycle_count: cycles.count,
        average_amount_per_pay_cycle: average_per_cycle,
        average_amount_less_base_annual: less_base_annual,
        average_amount_less_base_monthly: less_base_monthly,
    };

    Ok(Assessment::Assessed(IncomeResult::eligible(
        resolution.amount,
        details,
    )))
}
