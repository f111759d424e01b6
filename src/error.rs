//! Error types for the income eligibility engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate,
//! together with the closed taxonomy of error codes reported to callers and
//! the per-field [`ValidationError`] record carried by every rejection.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::models::{IncomeType, VerificationMethod};

/// Stable error codes reported to callers.
///
/// Codes fall into three families: schema defects (detected before the
/// engine runs), business-rule defects (raised by the validator) and
/// system failures.
///
/// # Example
///
/// ```
/// use income_engine::error::ErrorCode;
///
/// assert_eq!(ErrorCode::FutureDate.as_str(), "FUTURE_DATE");
/// assert!(ErrorCode::FutureDate.is_business_rule());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The request body was not valid JSON.
    InvalidJsonSyntax,
    /// A required field was missing.
    MissingRequiredField,
    /// A field had the wrong JSON type or an unknown variant tag.
    InvalidDataType,
    /// A date field was not a valid `YYYY-MM-DD` date.
    InvalidDateFormat,
    /// An enum field held an unknown value.
    InvalidEnumValue,
    /// A numeric field was outside its permitted range.
    OutOfRange,
    /// A money field carried more than two decimal places.
    InvalidDecimalPrecision,

    /// A date lies after the validation date.
    FutureDate,
    /// The payslip end date precedes the employment start date.
    InvalidDateRange,
    /// Prior financial year income is required but absent.
    MissingLastFyIncome,
    /// Prior financial year bonus is required but absent.
    MissingLastFyBonus,
    /// Employment is shorter than the minimum duration.
    InsufficientEmploymentDuration,
    /// The pay-cycle conversion produced zero cycles.
    ZeroPayCycles,
    /// A derived figure came out negative.
    NegativeCalculatedValue,
    /// The verification method does not suit the income type.
    InvalidCombination,

    /// The engine failed for a reason unrelated to the request.
    CalculationEngineError,
    /// Unexpected failure outside the engine.
    InternalServerError,
}

impl ErrorCode {
    /// Returns the wire representation of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidJsonSyntax => "INVALID_JSON_SYNTAX",
            ErrorCode::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            ErrorCode::InvalidDataType => "INVALID_DATA_TYPE",
            ErrorCode::InvalidDateFormat => "INVALID_DATE_FORMAT",
            ErrorCode::InvalidEnumValue => "INVALID_ENUM_VALUE",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidDecimalPrecision => "INVALID_DECIMAL_PRECISION",
            ErrorCode::FutureDate => "FUTURE_DATE",
            ErrorCode::InvalidDateRange => "INVALID_DATE_RANGE",
            ErrorCode::MissingLastFyIncome => "MISSING_LAST_FY_INCOME",
            ErrorCode::MissingLastFyBonus => "MISSING_LAST_FY_BONUS",
            ErrorCode::InsufficientEmploymentDuration => "INSUFFICIENT_EMPLOYMENT_DURATION",
            ErrorCode::ZeroPayCycles => "ZERO_PAY_CYCLES",
            ErrorCode::NegativeCalculatedValue => "NEGATIVE_CALCULATED_VALUE",
            ErrorCode::InvalidCombination => "INVALID_COMBINATION",
            ErrorCode::CalculationEngineError => "CALCULATION_ENGINE_ERROR",
            ErrorCode::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Returns true for codes raised by the business-rule validator.
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            ErrorCode::FutureDate
                | ErrorCode::InvalidDateRange
                | ErrorCode::MissingLastFyIncome
                | ErrorCode::MissingLastFyBonus
                | ErrorCode::InsufficientEmploymentDuration
                | ErrorCode::ZeroPayCycles
                | ErrorCode::NegativeCalculatedValue
                | ErrorCode::InvalidCombination
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule violation, naming the offending field.
///
/// # Example
///
/// ```
/// use income_engine::error::{ErrorCode, ValidationError};
///
/// let error = ValidationError::future_date("endDateLatestPayslip", "2099-01-01");
/// assert_eq!(error.code, ErrorCode::FutureDate);
/// assert_eq!(error.path, "$.endDateLatestPayslip");
/// assert_eq!(error.message, "Date 'endDateLatestPayslip' cannot be in the future");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// The field (or calculated figure) that violated the rule.
    pub field: String,
    /// The stable error code.
    pub code: ErrorCode,
    /// Human-readable message with the concrete values interpolated.
    pub message: String,
    /// The offending value, or `null`.
    pub value: Value,
    /// JSON path of the offending value.
    pub path: String,
}

impl ValidationError {
    /// Creates an error whose path is derived from the field name.
    pub fn new(
        field: impl Into<String>,
        code: ErrorCode,
        message: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        let field = field.into();
        let path = format!("$.{}", field);
        Self {
            field,
            code,
            message: message.into(),
            value: value.into(),
            path,
        }
    }

    /// Replaces the JSON path of this error.
    pub fn at_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// A date field lies after the validation date.
    pub fn future_date(field: &str, value: impl fmt::Display) -> Self {
        Self::new(
            field,
            ErrorCode::FutureDate,
            format!("Date '{}' cannot be in the future", field),
            value.to_string(),
        )
    }

    /// The payslip end date precedes the employment start date.
    pub fn invalid_date_range(end_date: impl fmt::Display, start_date: impl fmt::Display) -> Self {
        Self::new(
            "endDateLatestPayslip",
            ErrorCode::InvalidDateRange,
            format!(
                "End date on latest payslip ({}) must be on or after employment start date ({})",
                end_date, start_date
            ),
            end_date.to_string(),
        )
    }

    /// Prior-FY income is required because the payslip is early in the FY.
    pub fn missing_last_fy_income(days_into_fy: i64, required_months: u32) -> Self {
        Self::new(
            "lastFyAnnualIncome",
            ErrorCode::MissingLastFyIncome,
            format!(
                "Last FY Annual Income required as end date on latest payslip is {} days into new financial year (less than {} months)",
                days_into_fy, required_months
            ),
            Value::Null,
        )
    }

    /// Two-year bonus verification needs the prior-FY bonus.
    pub fn missing_last_fy_bonus() -> Self {
        Self::new(
            "lastFyBonus",
            ErrorCode::MissingLastFyBonus,
            "Last FY Bonus required for two-year verification method",
            Value::Null,
        )
    }

    /// Employment is shorter than the minimum duration.
    pub fn insufficient_employment_duration(days: i64, minimum_days: i64) -> Self {
        Self::new(
            "employmentDuration",
            ErrorCode::InsufficientEmploymentDuration,
            format!(
                "Employment duration of {} days is less than required {} days. Annual override amount required for eligibility",
                days, minimum_days
            ),
            days,
        )
        .at_path("$.calculated.employmentDuration")
    }

    /// The pay-cycle conversion produced zero cycles.
    pub fn zero_pay_cycles(end_date: impl fmt::Display, start_date: impl fmt::Display) -> Self {
        Self::new(
            "payCycles",
            ErrorCode::ZeroPayCycles,
            format!(
                "Calculated pay cycles resulted in zero. Verify payslip date ({}) is after employment start date ({}) and within current financial year",
                end_date, start_date
            ),
            0,
        )
        .at_path("$.calculated.payCycles")
    }

    /// A derived figure came out negative.
    pub fn negative_calculated_value(calculation_type: &str, value: impl fmt::Display) -> Self {
        Self::new(
            "calculatedValue",
            ErrorCode::NegativeCalculatedValue,
            format!(
                "Calculation error: {} resulted in negative value. Check input data validity",
                calculation_type
            ),
            value.to_string(),
        )
        .at_path(format!("$.calculated.{}", calculation_type))
    }

    /// The verification method does not suit the income type.
    pub fn invalid_combination(
        verification_method: Option<VerificationMethod>,
        income_type: IncomeType,
    ) -> Self {
        let method = verification_method
            .map(|method| method.as_str())
            .unwrap_or("undefined");
        Self::new(
            "verificationMethod",
            ErrorCode::InvalidCombination,
            format!(
                "Verification method '{}' is not valid for income type '{}'",
                method,
                income_type.as_str()
            ),
            verification_method.map_or(Value::Null, |method| Value::from(method.as_str())),
        )
    }
}

/// The main error type for the income eligibility engine.
///
/// # Example
///
/// ```
/// use income_engine::error::{EngineError, ValidationError};
///
/// let error = EngineError::from(ValidationError::missing_last_fy_bonus());
/// assert_eq!(
///     error.to_string(),
///     "Business rule violation: Last FY Bonus required for two-year verification method"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// One or more business rules were violated.
    #[error("Business rule violation: {}", summarize(.errors))]
    BusinessRule {
        /// The violations, in the order they were detected.
        errors: Vec<ValidationError>,
    },

    /// The request was structurally invalid.
    #[error("Invalid input: {}", summarize(.errors))]
    InvalidInput {
        /// The structural defects.
        errors: Vec<ValidationError>,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration entry broke a registry invariant.
    #[error("Invalid configuration for '{income_type}': {message}")]
    InvalidConfig {
        /// The income type whose entry is invalid.
        income_type: String,
        /// What was wrong with it.
        message: String,
    },

    /// No calculation configuration is registered for an income type.
    #[error("No calculation configuration registered for income type '{income_type}'")]
    MissingCalculationConfig {
        /// The income type that was looked up.
        income_type: IncomeType,
    },
}

impl EngineError {
    /// Returns the individual violations carried by this error.
    ///
    /// Configuration failures are reported as a single system error.
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        match self {
            EngineError::BusinessRule { errors } | EngineError::InvalidInput { errors } => {
                errors.clone()
            }
            other => vec![
                ValidationError::new(
                    "general",
                    ErrorCode::CalculationEngineError,
                    other.to_string(),
                    Value::Null,
                )
                .at_path("$"),
            ],
        }
    }
}

impl From<ValidationError> for EngineError {
    fn from(error: ValidationError) -> Self {
        EngineError::BusinessRule {
            errors: vec![error],
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
