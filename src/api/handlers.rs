//! HTTP request handlers for the income eligibility API.

use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::calculate;

use super::request::parse_calculation_request;
use super::response::{API_VERSION, ApiErrorResponse, LOGIC_VERSION, SuccessResponse};
use super::state::AppState;

/// Header carrying the request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Handler for GET /health.
async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "versions": {
            "api": API_VERSION,
            "logic": LOGIC_VERSION,
        }
    }))
}

/// Handler for POST /calculate.
///
/// Parses the body, runs the engine against today's date and wraps the
/// outcome in the success or error envelope.
async fn calculate_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = request_id(&headers);
    info!(request_id = %request_id, "Processing calculation request");

    let request = match parse_calculation_request(&body) {
        Ok(request) => request,
        Err(err) => {
            warn!(request_id = %request_id, error = %err, "Rejected malformed request");
            let response = ApiErrorResponse::from_engine_error(&err, request_id.clone());
            return with_request_id(response.into_response(), &request_id);
        }
    };

    let start_time = Instant::now();
    let response = match calculate(&request, state.config()) {
        Ok(result) => {
            info!(
                request_id = %request_id,
                income_type = %request.income_type(),
                allowable_annual_income = %result.allowable_annual_income,
                eligible = result.eligible,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            (StatusCode::OK, Json(SuccessResponse::new(&request, result))).into_response()
        }
        Err(err) => {
            warn!(
                request_id = %request_id,
                income_type = %request.income_type(),
                error = %err,
                "Calculation failed"
            );
            ApiErrorResponse::from_engine_error(&err, request_id.clone()).into_response()
        }
    };

    with_request_id(response, &request_id)
}

/// Echoes the inbound correlation id, or generates a fresh one.
fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

fn with_request_id(mut response: Response, request_id: &str) -> Response {
    if let Ok(value) = HeaderValue::from_str(request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_echoes_header() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("trace-42"));
        assert_eq!(request_id(&headers), "trace-42");
    }

    #[test]
    fn test_request_id_generated_when_absent() {
        let generated = request_id(&HeaderMap::new());
        assert!(Uuid::parse_str(&generated).is_ok());
    }

    #[test]
    fn test_blank_request_id_is_replaced() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("  "));
        assert_ne!(request_id(&headers), "  ");
    }
}
