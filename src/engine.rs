//! Entry points of the income eligibility engine.
//!
//! [`assess`] dispatches a request to the employment-based or
//! annual-comparison pipeline and returns the unfolded [`Assessment`].
//! [`calculate_as_of`] folds that into the [`IncomeResult`] callers receive,
//! and [`calculate`] does the same against the local calendar date.

use chrono::{Local, NaiveDate};

use crate::calculation::{assess_employment_income, calculate_annual_income};
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{Assessment, IncomeFamily, IncomeRequest, IncomeResult};

/// Assesses a request, keeping an employment-duration shortfall distinct.
///
/// `today` is the date future-dated fields are compared against; nothing
/// else depends on it.
///
/// # Errors
///
/// Returns `EngineError::BusinessRule` for a broken business rule, or a
/// configuration error if the income type has no registry entry.
pub fn assess(
    request: &IncomeRequest,
    config: &EngineConfig,
    today: NaiveDate,
) -> EngineResult<Assessment> {
    match request.family() {
        IncomeFamily::Employment(income) => {
            let calculation_config = config.calculation_config(income.income_type)?;
            assess_employment_income(&income, calculation_config, config.constants(), today)
        }
        IncomeFamily::Annual(income) => calculate_annual_income(&income).map(Assessment::Assessed),
    }
}

/// Calculates the allowable annual income as of a given date.
///
/// # Example
///
/// ```
/// use income_engine::config::EngineConfig;
/// use income_engine::engine::calculate_as_of;
/// use income_engine::models::IncomeRequest;
/// use chrono::NaiveDate;
///
/// let request: IncomeRequest = serde_json::from_str(r#"{
///     "incomeType": "BONUS",
///     "verificationMethod": "TWO_YEAR_VERIFICATION",
///     "currentFyBonus": 30000,
///     "lastFyBonus": 60000
/// }"#).unwrap();
///
/// let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
/// let result = calculate_as_of(&request, EngineConfig::builtin(), today).unwrap();
/// assert_eq!(result.allowable_annual_income.to_string(), "30000");
/// ```
pub fn calculate_as_of(
    request: &IncomeRequest,
    config: &EngineConfig,
    today: NaiveDate,
) -> EngineResult<IncomeResult> {
    assess(request, config, today).map(Assessment::into_result)
}

/// Calculates the allowable annual income as of the local calendar date.
pub fn calculate(request: &IncomeRequest, config: &EngineConfig) -> EngineResult<IncomeResult> {
    calculate_as_of(request, config, Local::now().date_naive())
}
