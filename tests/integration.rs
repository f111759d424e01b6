//! Integration tests for the income eligibility API.
//!
//! This suite drives the axum router end to end and covers:
//! - Rolling aggregation across the financial year boundary
//! - Priority tiers (actual YTD, override, calculated)
//! - MONTHLY pay-cycle rounding
//! - The employment-duration soft failure and its override bypass
//! - Annual-comparison income (bonus, investments)
//! - Structural (400) and business-rule (422) errors
//! - Request correlation ids

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use income_engine::api::{AppState, REQUEST_ID_HEADER, create_router};
use income_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    let loader = ConfigLoader::load("./config").expect("Failed to load config");
    create_router(AppState::new(loader))
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value, Option<String>) {
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let request_id = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json, request_id)
}

async fn post_raw(body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/calculate")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, json, _) = send(create_router_for_test(), request).await;
    (status, json)
}

async fn post_calculate(body: Value) -> (StatusCode, Value) {
    post_raw(&body.to_string()).await
}

fn amount(json: &Value) -> f64 {
    json["data"]["allowableAnnualIncome"]
        .as_f64()
        .expect("allowableAnnualIncome should be a number")
}

fn first_error_code(json: &Value) -> &str {
    json["errors"][0]["code"].as_str().unwrap_or_default()
}

fn overtime_request() -> Value {
    json!({
        "incomeType": "OVERTIME",
        "verificationMethod": "ESSENTIAL_SERVICES",
        "salaryFrequency": "MONTHLY",
        "baseIncome": 2000,
        "endDateLatestPayslip": "2024-12-01",
        "employmentStartDate": "2024-01-01",
        "ytdAmountLatestPayslip": 88000,
        "lastFyAnnualIncome": 150000
    })
}

fn commissions_request() -> Value {
    json!({
        "incomeType": "COMMISSIONS",
        "salaryFrequency": "FORTNIGHTLY",
        "baseIncome": 2000,
        "endDateLatestPayslip": "2025-06-01",
        "employmentStartDate": "2024-07-01",
        "ytdAmountLatestPayslip": 150000,
        "lastFyAnnualIncome": 120000,
        "actualYtdCommission": 85000
    })
}

fn casual_request(start: &str, end: &str) -> Value {
    json!({
        "incomeType": "CASUAL",
        "salaryFrequency": "WEEKLY",
        "endDateLatestPayslip": end,
        "employmentStartDate": start,
        "ytdAmountLatestPayslip": 30000
    })
}

// =============================================================================
// Employment-based income
// =============================================================================

#[tokio::test]
async fn test_overtime_rolling_aggregation_end_to_end() {
    let (status, json) = post_calculate(overtime_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["incomeType"], "OVERTIME");
    assert_eq!(json["data"]["verificationMethod"], "ESSENTIAL_SERVICES");
    assert_eq!(json["data"]["eligible"], true);
    assert_eq!(amount(&json), 177000.0);

    let details = &json["data"]["calculationDetails"];
    assert_eq!(details["annualBaseSalary"].as_f64(), Some(24000.0));
    assert_eq!(details["expectedYtdBaseSalary"].as_f64(), Some(10000.0));
    assert_eq!(details["payCycleCount"].as_u64(), Some(5));
    assert_eq!(details["averageAmountPerPayCycle"].as_f64(), Some(17600.0));
    assert_eq!(details["averageAmountLessBaseAnnual"].as_f64(), Some(187200.0));
    assert_eq!(details["averageAmountLessBaseMonthly"].as_f64(), Some(15600.0));
}

#[tokio::test]
async fn test_commissions_actual_ytd_has_priority() {
    let mut request = commissions_request();
    request["annualOverrideAmount"] = json!(130000);

    let (status, json) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&json), 85000.0);
    assert_eq!(
        json["data"]["calculationDetails"]["payCycleCount"].as_u64(),
        Some(24)
    );
    assert!(json["data"].get("verificationMethod").is_none());
}

#[tokio::test]
async fn test_monthly_pay_cycles_round_down_below_threshold() {
    let request = json!({
        "incomeType": "CONTRACT_VARIABLE",
        "salaryFrequency": "MONTHLY",
        "endDateLatestPayslip": "2025-06-01",
        "employmentStartDate": "2024-07-01",
        "ytdAmountLatestPayslip": 110000
    });

    let (status, json) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["data"]["calculationDetails"]["payCycleCount"].as_u64(),
        Some(11)
    );
    assert_eq!(
        json["data"]["calculationDetails"]["averageAmountPerPayCycle"].as_f64(),
        Some(10000.0)
    );
    assert_eq!(amount(&json), 120000.0);
}

#[tokio::test]
async fn test_short_employment_is_ineligible_not_error() {
    let (status, json) = post_calculate(casual_request("2024-09-01", "2025-02-01")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["eligible"], false);
    assert_eq!(amount(&json), 0.0);
    let details = &json["data"]["calculationDetails"];
    assert_eq!(details["payCycleCount"].as_u64(), Some(0));
    assert_eq!(details["averageAmountLessBaseAnnual"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_override_bypasses_short_employment() {
    let mut request = casual_request("2024-09-01", "2025-02-01");
    request["annualOverrideAmount"] = json!(80000);

    let (status, json) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["eligible"], true);
    assert_eq!(amount(&json), 80000.0);
}

#[tokio::test]
async fn test_zero_ytd_is_eligible_with_zero_income() {
    let mut request = casual_request("2024-07-01", "2025-06-01");
    request["ytdAmountLatestPayslip"] = json!(0);

    let (status, json) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["eligible"], true);
    assert_eq!(amount(&json), 0.0);
}

// =============================================================================
// Annual-comparison income
// =============================================================================

#[tokio::test]
async fn test_two_year_bonus_is_capped_at_current_year() {
    let request = json!({
        "incomeType": "BONUS",
        "verificationMethod": "TWO_YEAR_VERIFICATION",
        "currentFyBonus": 30000,
        "lastFyBonus": 60000
    });

    let (status, json) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&json), 30000.0);
    assert_eq!(
        json["data"]["calculationDetails"]["averageAmountLessBaseMonthly"].as_f64(),
        Some(2500.0)
    );
}

#[tokio::test]
async fn test_investment_shares_average() {
    let request = json!({
        "incomeType": "INVESTMENT_SHARES",
        "currentFy": 80000,
        "lastFy": 60000
    });

    let (status, json) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&json), 70000.0);
    assert_eq!(json["data"]["eligible"], true);
}

#[tokio::test]
async fn test_calculation_is_idempotent() {
    let (_, first) = post_calculate(overtime_request()).await;
    let (_, second) = post_calculate(overtime_request()).await;

    assert_eq!(first["data"], second["data"]);
}

// =============================================================================
// Business-rule errors (422)
// =============================================================================

#[tokio::test]
async fn test_end_before_start_is_invalid_date_range() {
    let (status, json) = post_calculate(casual_request("2024-07-01", "2024-06-30")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["success"], false);
    assert_eq!(first_error_code(&json), "INVALID_DATE_RANGE");
    assert_eq!(json["errors"][0]["field"], "endDateLatestPayslip");
    assert!(json["requestId"].is_string());
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_future_payslip_is_rejected() {
    let (status, json) = post_calculate(casual_request("2024-07-01", "2099-01-01")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(first_error_code(&json), "FUTURE_DATE");
}

#[tokio::test]
async fn test_missing_last_fy_income_is_rejected() {
    let mut request = overtime_request();
    request.as_object_mut().unwrap().remove("lastFyAnnualIncome");

    let (status, json) = post_calculate(request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(first_error_code(&json), "MISSING_LAST_FY_INCOME");
    assert_eq!(
        json["errors"][0]["message"],
        "Last FY Annual Income required as end date on latest payslip is 153 days into new financial year (less than 6 months)"
    );
}

#[tokio::test]
async fn test_verification_method_on_casual_is_invalid_combination() {
    let mut request = casual_request("2024-07-01", "2025-06-01");
    request["verificationMethod"] = json!("ESSENTIAL_SERVICES");

    let (status, json) = post_calculate(request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(first_error_code(&json), "INVALID_COMBINATION");
}

#[tokio::test]
async fn test_ytd_below_base_is_negative_value() {
    let mut request = overtime_request();
    request["ytdAmountLatestPayslip"] = json!(5000);

    let (status, json) = post_calculate(request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(first_error_code(&json), "NEGATIVE_CALCULATED_VALUE");
    assert_eq!(
        json["errors"][0]["path"],
        "$.calculated.averageAmountLessBaseIncomeAnnual"
    );
}

#[tokio::test]
async fn test_two_year_bonus_without_last_fy_is_rejected() {
    let request = json!({
        "incomeType": "BONUS",
        "verificationMethod": "TWO_YEAR_VERIFICATION",
        "currentFyBonus": 30000
    });

    let (status, json) = post_calculate(request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(first_error_code(&json), "MISSING_LAST_FY_BONUS");
}

// =============================================================================
// Structural errors (400)
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let (status, json) = post_raw("{\"incomeType\": \"CASUAL\",").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(first_error_code(&json), "INVALID_JSON_SYNTAX");
}

#[tokio::test]
async fn test_missing_field_returns_400() {
    let mut request = casual_request("2024-07-01", "2025-06-01");
    request.as_object_mut().unwrap().remove("salaryFrequency");

    let (status, json) = post_calculate(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(first_error_code(&json), "MISSING_REQUIRED_FIELD");
    assert_eq!(json["errors"][0]["field"], "salaryFrequency");
}

#[tokio::test]
async fn test_bad_date_format_returns_400() {
    let (status, json) = post_calculate(casual_request("2024-7-1", "2025-06-01")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(first_error_code(&json), "INVALID_DATE_FORMAT");
    assert_eq!(json["errors"][0]["field"], "employmentStartDate");
}

#[tokio::test]
async fn test_unknown_income_type_returns_400() {
    let (status, json) = post_calculate(json!({ "incomeType": "LOTTERY" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(first_error_code(&json), "INVALID_ENUM_VALUE");
}

#[tokio::test]
async fn test_negative_money_returns_400() {
    let mut request = casual_request("2024-07-01", "2025-06-01");
    request["ytdAmountLatestPayslip"] = json!(-10);

    let (status, json) = post_calculate(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(first_error_code(&json), "OUT_OF_RANGE");
}

#[tokio::test]
async fn test_three_decimal_places_returns_400() {
    let mut request = casual_request("2024-07-01", "2025-06-01");
    request["ytdAmountLatestPayslip"] = json!(30000.125);

    let (status, json) = post_calculate(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(first_error_code(&json), "INVALID_DECIMAL_PRECISION");
}

// =============================================================================
// Correlation ids and health
// =============================================================================

#[tokio::test]
async fn test_request_id_is_echoed() {
    let request = Request::builder()
        .method("POST")
        .uri("/calculate")
        .header("Content-Type", "application/json")
        .header(REQUEST_ID_HEADER, "loan-123")
        .body(Body::from(
            casual_request("2024-07-01", "2024-06-30").to_string(),
        ))
        .unwrap();

    let (status, json, request_id) = send(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(request_id.as_deref(), Some("loan-123"));
    assert_eq!(json["requestId"], "loan-123");
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let request = Request::builder()
        .method("POST")
        .uri("/calculate")
        .header("Content-Type", "application/json")
        .body(Body::from(overtime_request().to_string()))
        .unwrap();

    let (_, _, request_id) = send(create_router_for_test(), request).await;

    let request_id = request_id.expect("response should carry a request id");
    assert!(uuid::Uuid::parse_str(&request_id).is_ok());
}

#[tokio::test]
async fn test_health_reports_versions() {
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, json, _) = send(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["versions"]["api"].is_string());
    assert!(json["versions"]["logic"].is_string());
}
