//! Performance benchmarks for the income eligibility engine.
//!
//! Covers the pure engine (one request per income family), the rolling
//! window on its own, batches of mixed requests, and a round trip through
//! the HTTP router.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use income_engine::api::{AppState, create_router};
use income_engine::calculation::{RollingWindowInput, aggregate_rolling_window};
use income_engine::config::{ConfigLoader, EngineConfig};
use income_engine::engine::calculate_as_of;
use income_engine::models::IncomeRequest;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

fn overtime_json() -> serde_json::Value {
    serde_json::json!({
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

fn commissions_json(ytd: i64) -> serde_json::Value {
    serde_json::json!({
        "incomeType": "COMMISSIONS",
        "salaryFrequency": "FORTNIGHTLY",
        "baseIncome": 2000,
        "endDateLatestPayslip": "2025-06-01",
        "employmentStartDate": "2024-07-01",
        "ytdAmountLatestPayslip": ytd,
        "lastFyAnnualIncome": 120000
    })
}

fn bonus_json() -> serde_json::Value {
    serde_json::json!({
        "incomeType": "BONUS",
        "verificationMethod": "TWO_YEAR_VERIFICATION",
        "currentFyBonus": 30000,
        "lastFyBonus": 60000
    })
}

fn request(json: serde_json::Value) -> IncomeRequest {
    serde_json::from_value(json).unwrap()
}

/// Benchmark: one request through the pure engine, per income family.
fn bench_single_request(c: &mut Criterion) {
    let config = EngineConfig::builtin();
    let mut group = c.benchmark_group("single_request");

    for (name, req) in [
        ("overtime", request(overtime_json())),
        ("commissions", request(commissions_json(150000))),
        ("bonus", request(bonus_json())),
    ] {
        group.bench_with_input(BenchmarkId::new("engine", name), &req, |b, req| {
            b.iter(|| black_box(calculate_as_of(black_box(req), config, today())))
        });
    }

    group.finish();
}

/// Benchmark: the rolling window at both supported lengths.
fn bench_rolling_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("rolling_window");

    for window_months in [6u32, 12] {
        let input = RollingWindowInput {
            end_date_latest_payslip: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            window_months,
            monthly_amount: Decimal::from(15600),
            annual_base_salary: Decimal::from(24000),
            last_fy_annual_income: Some(Decimal::from(150000)),
        };
        group.bench_with_input(
            BenchmarkId::new("months", window_months),
            &input,
            |b, input| b.iter(|| black_box(aggregate_rolling_window(black_box(input)))),
        );
    }

    group.finish();
}

/// Benchmark: batches of mixed requests through the pure engine.
fn bench_batch(c: &mut Criterion) {
    let config = EngineConfig::builtin();
    let mut group = c.benchmark_group("batch_processing");

    for size in [100usize, 1000] {
        let requests: Vec<IncomeRequest> = (0..size)
            .map(|i| match i % 3 {
                0 => request(overtime_json()),
                1 => request(commissions_json(100_000 + i as i64)),
                _ => request(bonus_json()),
            })
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("requests", size), &requests, |b, requests| {
            b.iter(|| {
                let results: Vec<_> = requests
                    .iter()
                    .map(|req| calculate_as_of(req, config, today()))
                    .collect();
                black_box(results)
            })
        });
    }

    group.finish();
}

/// Benchmark: one request through the HTTP router.
fn bench_http_round_trip(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let loader = ConfigLoader::load("./config").expect("Failed to load config");
    let router = create_router(AppState::new(loader));
    let body = overtime_json().to_string();

    c.bench_function("http_overtime", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_single_request,
    bench_rolling_window,
    bench_batch,
    bench_http_round_trip,
);
criterion_main!(benches);
