//! Request parsing for the `/calculate` endpoint.
//!
//! The body is checked structurally before the engine sees it: JSON syntax,
//! the `incomeType` tag, date formats, required fields and types, and the
//! range and precision of every money field. Every defect is reported as
//! `EngineError::InvalidInput`.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::calculation::parse_date;
use crate::error::{EngineError, EngineResult, ErrorCode, ValidationError};
use crate::models::{IncomeRequest, IncomeType};

/// Largest money amount accepted on any field.
pub const MAX_MONEY_AMOUNT: Decimal = Decimal::from_parts(999_999_999, 0, 0, false, 2);

/// Date fields checked for strict `YYYY-MM-DD` format.
const DATE_FIELDS: [&str; 2] = ["endDateLatestPayslip", "employmentStartDate"];

/// Parses and structurally validates a `/calculate` request body.
///
/// # Example
///
/// ```
/// use income_engine::api::parse_calculation_request;
/// use income_engine::error::ErrorCode;
///
/// let body = br#"{"incomeType": "BONUS", "verificationMethod": "ONE_YEAR_VERIFICATION", "currentFyBonus": -1}"#;
/// let err = parse_calculation_request(body).unwrap_err();
/// assert_eq!(err.validation_errors()[0].code, ErrorCode::OutOfRange);
/// ```
pub fn parse_calculation_request(body: &[u8]) -> EngineResult<IncomeRequest> {
    let value: Value = serde_json::from_slice(body).map_err(|err| {
        invalid(ValidationError::new(
            "body",
            ErrorCode::InvalidJsonSyntax,
            format!("Invalid JSON syntax in request body: {}", err),
            Value::Null,
        )
        .at_path("$"))
    })?;

    let object = value.as_object().ok_or_else(|| {
        invalid(
            ValidationError::new(
                "body",
                ErrorCode::InvalidDataType,
                format!(
                    "Field 'body' must be of type object, received {}",
                    json_type(&value)
                ),
                Value::Null,
            )
            .at_path("$"),
        )
    })?;

    check_income_type(object.get("incomeType"))?;

    let date_errors: Vec<ValidationError> = DATE_FIELDS
        .iter()
        .filter_map(|field| object.get(*field).map(|raw| (*field, raw)))
        .filter_map(|(field, raw)| check_date_field(field, raw).err())
        .collect();
    if !date_errors.is_empty() {
        return Err(EngineError::InvalidInput {
            errors: date_errors,
        });
    }

    let request: IncomeRequest =
        serde_json::from_value(value).map_err(|err| invalid(schema_error(&err.to_string())))?;

    let money_errors: Vec<ValidationError> = request
        .money_fields()
        .into_iter()
        .filter_map(|(field, amount)| check_money_field(field, amount).err())
        .collect();
    if !money_errors.is_empty() {
        return Err(EngineError::InvalidInput {
            errors: money_errors,
        });
    }

    Ok(request)
}

fn invalid(error: ValidationError) -> EngineError {
    EngineError::InvalidInput {
        errors: vec![error],
    }
}

fn check_income_type(raw: Option<&Value>) -> EngineResult<()> {
    let valid_values = || {
        IncomeType::ALL
            .iter()
            .map(|income_type| income_type.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    match raw {
        None | Some(Value::Null) => Err(invalid(missing_field("incomeType"))),
        Some(Value::String(tag)) if IncomeType::ALL.iter().any(|t| t.as_str() == tag) => Ok(()),
        Some(Value::String(tag)) => Err(invalid(ValidationError::new(
            "incomeType",
            ErrorCode::InvalidEnumValue,
            format!(
                "Invalid value '{}' for field 'incomeType'. Must be one of: {}",
                tag,
                valid_values()
            ),
            tag.as_str(),
        ))),
        Some(other) => Err(invalid(ValidationError::new(
            "incomeType",
            ErrorCode::InvalidDataType,
            format!(
                "Field 'incomeType' must be of type string, received {}",
                json_type(other)
            ),
            other.clone(),
        ))),
    }
}

fn check_date_field(field: &str, raw: &Value) -> Result<(), ValidationError> {
    match raw {
        Value::String(text) => parse_date(field, text).map(|_| ()).map_err(|err| {
            err.validation_errors()
                .into_iter()
                .next()
                .unwrap_or_else(|| missing_field(field))
        }),
        Value::Null => Ok(()),
        other => Err(ValidationError::new(
            field,
            ErrorCode::InvalidDataType,
            format!(
                "Field '{}' must be of type string, received {}",
                field,
                json_type(other)
            ),
            other.clone(),
        )),
    }
}

/// Checks one money field for sign, upper bound and cent precision.
pub fn check_money_field(field: &str, amount: Decimal) -> Result<(), ValidationError> {
    if amount < Decimal::ZERO || amount > MAX_MONEY_AMOUNT {
        return Err(ValidationError::new(
            field,
            ErrorCode::OutOfRange,
            format!(
                "Value {} for field '{}' must be between 0 and {}",
                amount.normalize(),
                field,
                MAX_MONEY_AMOUNT
            ),
            amount.normalize().to_string(),
        ));
    }

    if amount.normalize().scale() > 2 {
        return Err(ValidationError::new(
            field,
            ErrorCode::InvalidDecimalPrecision,
            format!("Field '{}' must have maximum 2 decimal places", field),
            amount.normalize().to_string(),
        ));
    }

    Ok(())
}

fn missing_field(field: &str) -> ValidationError {
    ValidationError::new(
        field,
        ErrorCode::MissingRequiredField,
        format!("Required field '{}' is missing or empty", field),
        Value::Null,
    )
}

/// Maps a serde error message onto the schema error taxonomy.
fn schema_error(message: &str) -> ValidationError {
    if let Some(field) = quoted_name(message, "missing field `") {
        return missing_field(&field);
    }

    if message.contains("unknown variant") {
        let value = quoted_name(message, "unknown variant `").unwrap_or_default();
        return ValidationError::new(
            "body",
            ErrorCode::InvalidEnumValue,
            format!("Invalid enum value: {}", message),
            value,
        )
        .at_path("$");
    }

    ValidationError::new(
        "body",
        ErrorCode::InvalidDataType,
        format!("Invalid field type: {}", message),
        Value::Null,
    )
    .at_path("$")
}

/// Extracts the backtick-quoted name following `prefix`.
fn quoted_name(message: &str, prefix: &str) -> Option<String> {
    let rest = &message[message.find(prefix)? + prefix.len()..];
    rest.find('`').map(|end| rest[..end].to_string())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn first_error(body: &str) -> ValidationError {
        match parse_calculation_request(body.as_bytes()).unwrap_err() {
            EngineError::InvalidInput { errors } => errors[0].clone(),
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_request_parses() {
        let request = parse_calculation_request(
            br#"{"incomeType": "INVESTMENT_SHARES", "currentFy": 80000.50, "lastFy": 60000}"#,
        )
        .unwrap();
        assert_eq!(request.income_type(), IncomeType::InvestmentShares);
    }

    #[test]
    fn test_syntax_error() {
        let error = first_error("{\"incomeType\": ");
        assert_eq!(error.code, ErrorCode::InvalidJsonSyntax);
        assert_eq!(error.path, "$");
    }

    #[test]
    fn test_non_object_body() {
        assert_eq!(first_error("[1, 2]").code, ErrorCode::InvalidDataType);
    }

    #[test]
    fn test_missing_income_type() {
        let error = first_error(r#"{"currentFy": 1}"#);
        assert_eq!(error.code, ErrorCode::MissingRequiredField);
        assert_eq!(error.field, "incomeType");
    }

    #[test]
    fn test_unknown_income_type() {
        let error = first_error(r#"{"incomeType": "SALARY"}"#);
        assert_eq!(error.code, ErrorCode::InvalidEnumValue);
        assert!(error.message.contains("Must be one of: OVERTIME, CASUAL"));
    }

    #[test]
    fn test_bad_date_format() {
        let error = first_error(
            r#"{
                "incomeType": "CASUAL",
                "salaryFrequency": "WEEKLY",
                "endDateLatestPayslip": "01/02/2025",
                "employmentStartDate": "2024-07-01",
                "ytdAmountLatestPayslip": 100
            }"#,
        );
        assert_eq!(error.code, ErrorCode::InvalidDateFormat);
        assert_eq!(error.field, "endDateLatestPayslip");
        assert_eq!(error.value, Value::from("01/02/2025"));
    }

    #[test]
    fn test_missing_variant_field() {
        let error = first_error(
            r#"{
                "incomeType": "CASUAL",
                "salaryFrequency": "WEEKLY",
                "endDateLatestPayslip": "2025-02-01",
                "employmentStartDate": "2024-07-01"
            }"#,
        );
        assert_eq!(error.code, ErrorCode::MissingRequiredField);
        assert_eq!(error.field, "ytdAmountLatestPayslip");
        assert_eq!(error.path, "$.ytdAmountLatestPayslip");
    }

    #[test]
    fn test_unknown_frequency() {
        let error = first_error(
            r#"{
                "incomeType": "CASUAL",
                "salaryFrequency": "DAILY",
                "endDateLatestPayslip": "2025-02-01",
                "employmentStartDate": "2024-07-01",
                "ytdAmountLatestPayslip": 100
            }"#,
        );
        assert_eq!(error.code, ErrorCode::InvalidEnumValue);
        assert_eq!(error.value, Value::from("DAILY"));
    }

    #[test]
    fn test_wrong_type() {
        let error = first_error(
            r#"{"incomeType": "INVESTMENT_SHARES", "currentFy": true, "lastFy": 1}"#,
        );
        assert_eq!(error.code, ErrorCode::InvalidDataType);
    }

    #[test]
    fn test_every_negative_money_field_reported() {
        let err = parse_calculation_request(
            br#"{"incomeType": "INVESTMENT_SHARES", "currentFy": -1, "lastFy": -2}"#,
        )
        .unwrap_err();
        let errors = err.validation_errors();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.code == ErrorCode::OutOfRange));
    }

    #[test]
    fn test_money_precision() {
        assert_eq!(
            check_money_field("baseIncome", dec!(2000.125)).unwrap_err().code,
            ErrorCode::InvalidDecimalPrecision
        );
        assert!(check_money_field("baseIncome", dec!(2000.10)).is_ok());
        assert!(check_money_field("baseIncome", dec!(2000.100)).is_ok());
    }

    #[test]
    fn test_money_upper_bound() {
        assert!(check_money_field("ytdAmountLatestPayslip", MAX_MONEY_AMOUNT).is_ok());
        let error =
            check_money_field("ytdAmountLatestPayslip", MAX_MONEY_AMOUNT + dec!(0.01)).unwrap_err();
        assert_eq!(error.code, ErrorCode::OutOfRange);
    }
}
