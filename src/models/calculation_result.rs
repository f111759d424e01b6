//! Calculation result models for the income eligibility engine.
//!
//! This module contains the [`IncomeResult`] returned for every successful
//! request, the [`CalculationDetails`] breakdown it carries, and the
//! [`Assessment`] outcome that keeps an employment-duration shortfall
//! distinct from an assessed figure.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::round_currency;

/// Intermediate figures behind an allowable income amount.
///
/// All six fields are always present. Fields that do not apply to an income
/// type are zero.
///
/// # Example
///
/// ```
/// use income_engine::models::CalculationDetails;
/// use rust_decimal::Decimal;
///
/// let details = CalculationDetails::zeroed();
/// assert_eq!(details.pay_cycle_count, 0);
/// assert_eq!(details.annual_base_salary, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationDetails {
    /// Base income annualized by the salary frequency.
    #[serde(with = "rust_decimal::serde::float")]
    pub annual_base_salary: Decimal,
    /// Base income expected over the elapsed pay cycles.
    #[serde(with = "rust_decimal::serde::float")]
    pub expected_ytd_base_salary: Decimal,
    /// Pay cycles elapsed in the current financial year.
    pub pay_cycle_count: u32,
    /// Year-to-date amount divided by the pay cycle count.
    #[serde(with = "rust_decimal::serde::float")]
    pub average_amount_per_pay_cycle: Decimal,
    /// Variable component annualized.
    #[serde(with = "rust_decimal::serde::float")]
    pub average_amount_less_base_annual: Decimal,
    /// Variable component per month.
    #[serde(with = "rust_decimal::serde::float")]
    pub average_amount_less_base_monthly: Decimal,
}

impl CalculationDetails {
    /// Returns details with every figure set to zero.
    pub fn zeroed() -> Self {
        Self {
            annual_base_salary: Decimal::ZERO,
            expected_ytd_base_salary: Decimal::ZERO,
            pay_cycle_count: 0,
            average_amount_per_pay_cycle: Decimal::ZERO,
            average_amount_less_base_annual: Decimal::ZERO,
            average_amount_less_base_monthly: Decimal::ZERO,
        }
    }

    /// Returns details for an annual-comparison income type.
    ///
    /// Pay-cycle and base-salary figures are zero; the calculated amount is
    /// reported as the annual and monthly variable component.
    pub fn for_annual_amount(amount: Decimal) -> Self {
        Self {
            average_amount_less_base_annual: amount,
            average_amount_less_base_monthly: amount / Decimal::from(12),
            ..Self::zeroed()
        }
    }

    /// Returns a copy with every money figure rounded to cents.
    pub fn rounded(&self) -> Self {
        Self {
            annual_base_salary: round_currency(self.annual_base_salary),
            expected_ytd_base_salary: round_currency(self.expected_ytd_base_salary),
            pay_cycle_count: self.pay_cycle_count,
            average_amount_per_pay_cycle: round_currency(self.average_amount_per_pay_cycle),
            average_amount_less_base_annual: round_currency(self.average_amount_less_base_annual),
            average_amount_less_base_monthly: round_currency(
                self.average_amount_less_base_monthly,
            ),
        }
    }
}

/// The final outcome of an income calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeResult {
    /// The annual income the lender may recognize.
    #[serde(with = "rust_decimal::serde::float")]
    pub allowable_annual_income: Decimal,
    /// The figures the amount was derived from.
    pub calculation_details: CalculationDetails,
    /// Whether the applicant is eligible for this income to be counted.
    pub eligible: bool,
}

impl IncomeResult {
    /// Creates an eligible result, rounding all money figures to cents.
    ///
    /// # Example
    ///
    /// ```
    /// use income_engine::models::{CalculationDetails, IncomeResult};
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let result = IncomeResult::eligible(
    ///     Decimal::from_str("1234.5678").unwrap(),
    ///     CalculationDetails::zeroed(),
    /// );
    /// assert_eq!(result.allowable_annual_income, Decimal::from_str("1234.57").unwrap());
    /// assert!(result.eligible);
    /// ```
    pub fn eligible(allowable_annual_income: Decimal, details: CalculationDetails) -> Self {
        Self {
            allowable_annual_income: round_currency(allowable_annual_income),
            calculation_details: details.rounded(),
            eligible: true,
        }
    }

    /// Creates the ineligible result: zero income and all-zero details.
    pub fn ineligible() -> Self {
        Self {
            allowable_annual_income: Decimal::ZERO,
            calculation_details: CalculationDetails::zeroed(),
            eligible: false,
        }
    }
}

/// How a request was resolved, before it is folded into an [`IncomeResult`].
///
/// An employment-duration shortfall is the only rule failure that yields a
/// successful, ineligible outcome rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assessment {
    /// The income was assessed and a figure produced.
    Assessed(IncomeResult),
    /// Employment was too short and no override was supplied.
    IneligibleDueToDuration {
        /// Days between employment start and the latest payslip end date.
        duration_days: i64,
    },
}

impl Assessment {
    /// Returns true if the income was assessed.
    pub fn is_eligible(&self) -> bool {
        matches!(self, Assessment::Assessed(result) if result.eligible)
    }

    /// Folds the outcome into the result returned to callers.
    pub fn into_result(self) -> IncomeResult {
        match self {
            Assessment::Assessed(result) => result,
            Assessment::IneligibleDueToDuration { .. } => IncomeResult::ineligible(),
        }
    }
}
