//! Response envelopes for the income eligibility API.
//!
//! Successful calculations are wrapped in [`SuccessResponse`]; every failure
//! is an [`ErrorResponse`] whose HTTP status depends on the error family.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, ValidationError};
use crate::models::{IncomeRequest, IncomeResult, IncomeType, VerificationMethod};

/// Version of the HTTP contract.
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version of the calculation rules.
pub const LOGIC_VERSION: &str = "1.0.0";

/// Versions reported with every successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versions {
    /// Version of the HTTP contract.
    pub api: String,
    /// Version of the calculation rules.
    pub logic: String,
}

impl Default for Versions {
    fn default() -> Self {
        Self {
            api: API_VERSION.to_string(),
            logic: LOGIC_VERSION.to_string(),
        }
    }
}

/// The `data` member of a successful response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationData {
    /// Income type of the request.
    pub income_type: IncomeType,
    /// Verification method of the request, when supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_method: Option<VerificationMethod>,
    /// The calculated result.
    #[serde(flatten)]
    pub result: IncomeResult,
}

/// Body of a 200 response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Always `true`.
    pub success: bool,
    /// The calculation outcome.
    pub data: CalculationData,
    /// Contract and rule versions.
    pub versions: Versions,
}

impl SuccessResponse {
    /// Wraps a result together with the request it answers.
    pub fn new(request: &IncomeRequest, result: IncomeResult) -> Self {
        Self {
            success: true,
            data: CalculationData {
                income_type: request.income_type(),
                verification_method: request.verification_method(),
                result,
            },
            versions: Versions::default(),
        }
    }
}

/// Body of a 400, 422 or 500 response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Every violation detected.
    pub errors: Vec<ValidationError>,
    /// When the error was produced.
    pub timestamp: DateTime<Utc>,
    /// Correlation id of the request.
    pub request_id: String,
}

/// An error body paired with its HTTP status.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ErrorResponse,
}

impl ApiErrorResponse {
    /// Builds the response for an engine error.
    ///
    /// Structural defects map to 400, business-rule violations to 422 and
    /// configuration failures to 500.
    pub fn from_engine_error(error: &EngineError, request_id: impl Into<String>) -> Self {
        Self {
            status: status_for(error),
            error: ErrorResponse {
                success: false,
                errors: error.validation_errors(),
                timestamp: Utc::now(),
                request_id: request_id.into(),
            },
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

/// Returns the HTTP status for an engine error.
pub fn status_for(error: &EngineError) -> StatusCode {
    match error {
        EngineError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        EngineError::BusinessRule { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::ConfigNotFound { .. }
        | EngineError::ConfigParseError { .. }
        | EngineError::InvalidConfig { .. }
        | EngineError::MissingCalculationConfig { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
