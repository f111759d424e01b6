//! Business-rule validation.
//!
//! Rules run in a fixed order and the first violation aborts the request:
//!
//! 1. Verification method suits the income type.
//! 2. Neither date lies in the future.
//! 3. The payslip end date is on or after the employment start date.
//! 4. Employment meets the minimum duration, unless an override is supplied.
//! 5. Prior-FY income is present when the payslip is early in the FY.
//! 6. The pay-cycle count is non-zero.
//! 7. No derived "less base" figure is negative.
//!
//! Rule 4 is not an error: a shortfall is reported as
//! [`DurationGate::InsufficientDuration`] so the engine can return an
//! ineligible result. Rules 6 and 7 need figures computed mid-pipeline and are
//! exposed as standalone checks.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::calculation::{add_months, days_between, fy_start};
use crate::config::{BusinessConstants, IncomeCalculationConfig};
use crate::error::{EngineError, EngineResult, ErrorCode, ValidationError};
use crate::models::{AnnualIncome, EmploymentIncome, IncomeType, VerificationMethod};

/// Outcome of the employment-duration rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationGate {
    /// Duration met, or an override bypassed the rule.
    Open,
    /// Employment is shorter than the minimum and no override was supplied.
    InsufficientDuration {
        /// Days from employment start to the payslip end date.
        days: i64,
    },
}

/// How an annual-comparison amount is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnualBasis {
    /// The current financial year figure alone.
    CurrentYear,
    /// The lesser of the two-year average and the current year.
    TwoYearAverage {
        /// Prior financial year figure.
        last_fy: Decimal,
    },
}

/// Checks the verification method against the income type's allowed set.
///
/// Types with an empty allowed set must not carry a method; other types must
/// carry one from their set.
pub fn check_verification_method(
    income_type: IncomeType,
    verification_method: Option<VerificationMethod>,
) -> Result<(), ValidationError> {
    let allowed = income_type.allowed_verification_methods();
    let valid = match verification_method {
        None => allowed.is_empty(),
        Some(method) => allowed.contains(&method),
    };

    if valid {
        Ok(())
    } else {
        Err(ValidationError::invalid_combination(
            verification_method,
            income_type,
        ))
    }
}

/// Rejects a date later than `today`. Today itself is allowed.
pub fn check_not_future(
    field: &str,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    if date > today {
        return Err(ValidationError::future_date(field, date));
    }
    Ok(())
}

/// Rejects a payslip end date earlier than the employment start date.
pub fn check_date_order(
    end_date_latest_payslip: NaiveDate,
    employment_start_date: NaiveDate,
) -> Result<(), ValidationError> {
    if end_date_latest_payslip < employment_start_date {
        return Err(ValidationError::invalid_date_range(
            end_date_latest_payslip,
            employment_start_date,
        ));
    }
    Ok(())
}

/// Applies the minimum employment duration rule.
///
/// A positive `annual_override_amount` bypasses the rule entirely.
pub fn employment_duration_gate(
    employment_start_date: NaiveDate,
    end_date_latest_payslip: NaiveDate,
    annual_override_amount: Option<Decimal>,
    constants: &BusinessConstants,
) -> DurationGate {
    if annual_override_amount.is_some_and(|amount| amount > Decimal::ZERO) {
        return DurationGate::Open;
    }

    let days = days_between(employment_start_date, end_date_latest_payslip);
    if days < constants.minimum_employment_days {
        DurationGate::InsufficientDuration { days }
    } else {
        DurationGate::Open
    }
}

/// Requires prior-FY income while the payslip is within the first
/// `required_months` of its financial year.
pub fn check_last_fy_income(
    end_date_latest_payslip: NaiveDate,
    required_months: u32,
    last_fy_annual_income: Option<Decimal>,
) -> Result<(), ValidationError> {
    if last_fy_annual_income.is_some() {
        return Ok(());
    }

    let fy = fy_start(end_date_latest_payslip);
    let months = i32::try_from(required_months).unwrap_or(i32::MAX);
    if end_date_latest_payslip < add_months(fy, months) {
        let days_into_fy = days_between(fy, end_date_latest_payslip);
        return Err(ValidationError::missing_last_fy_income(
            days_into_fy,
            required_months,
        ));
    }

    Ok(())
}

/// Rejects a zero pay-cycle count.
pub fn check_pay_cycles(
    pay_cycle_count: u32,
    end_date_latest_payslip: NaiveDate,
    employment_start_date: NaiveDate,
) -> Result<(), ValidationError> {
    if pay_cycle_count == 0 {
        return Err(ValidationError::zero_pay_cycles(
            end_date_latest_payslip,
            employment_start_date,
        ));
    }
    Ok(())
}

/// Rejects a negative derived figure.
pub fn check_non_negative(calculation_type: &str, value: Decimal) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::negative_calculated_value(
            calculation_type,
            value.normalize(),
        ));
    }
    Ok(())
}

/// Runs rules 1 to 5 for an employment-based request.
///
/// # Returns
///
/// Returns the duration gate when rules 1 to 3 pass. When the gate is
/// [`DurationGate::InsufficientDuration`] rule 5 is not evaluated.
///
/// # Errors
///
/// Returns `EngineError::BusinessRule` carrying the first violated rule.
pub fn validate_employment_income(
    income: &EmploymentIncome,
    config: &IncomeCalculationConfig,
    constants: &BusinessConstants,
    today: NaiveDate,
) -> EngineResult<DurationGate> {
    let end = income.end_date_latest_payslip;
    let start = income.employment_start_date;

    check_verification_method(income.income_type, income.verification_method)?;
    check_not_future("endDateLatestPayslip", end, today)?;
    check_not_future("employmentStartDate", start, today)?;
    check_date_order(end, start)?;

    let gate = employment_duration_gate(start, end, income.annual_override_amount, constants);
    if let DurationGate::InsufficientDuration { days } = gate {
        debug!(
            income_type = %income.income_type,
            days,
            minimum_days = constants.minimum_employment_days,
            "Employment duration below minimum"
        );
        return Ok(gate);
    }

    check_last_fy_income(end, config.last_fy_required_months, income.last_fy_annual_income)?;

    Ok(DurationGate::Open)
}

/// Validates a BONUS or INVESTMENT request and picks its calculation basis.
///
/// # Errors
///
/// Returns `EngineError::BusinessRule` for an unsuitable verification method
/// or a two-year bonus without a prior-FY bonus.
pub fn validate_annual_income(income: &AnnualIncome) -> EngineResult<AnnualBasis> {
    check_verification_method(income.income_type, income.verification_method)?;

    match (income.income_type, income.verification_method) {
        (IncomeType::Bonus, Some(VerificationMethod::OneYearVerification)) => {
            Ok(AnnualBasis::CurrentYear)
        }
        (IncomeType::Bonus, _) => income
            .last_fy
            .map(|last_fy| AnnualBasis::TwoYearAverage { last_fy })
            .ok_or_else(|| ValidationError::missing_last_fy_bonus().into()),
        (_, _) => income
            .last_fy
            .map(|last_fy| AnnualBasis::TwoYearAverage { last_fy })
            .ok_or_else(|| EngineError::InvalidInput {
                errors: vec![ValidationError::new(
                    "lastFy",
                    ErrorCode::MissingRequiredField,
                    "Field 'lastFy' is required",
                    serde_json::Value::Null,
                )],
            }),
    }
}
