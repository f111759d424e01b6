//! Calculation logic for the income eligibility engine.
//!
//! This module contains the pure arithmetic of the engine: Australian
//! financial year date handling, pay-cycle annualization, rolling-window
//! aggregation across the financial year boundary, priority-tier resolution,
//! and the two calculation pipelines (employment-based and annual-comparison).

mod annual_income;
mod common;
mod employment_income;
mod financial_year;
mod pay_cycles;
mod priority;
mod rolling_aggregation;

pub use annual_income::{annual_calculation_type, calculate_annual_income, capped_two_year_average};
pub use common::round_currency;
pub use employment_income::{LESS_BASE_ANNUAL_CALCULATION, assess_employment_income};
pub use financial_year::{
    FY_START_MONTH, FinancialYearBounds, add_months, days_between, fy_bounds, fy_start,
    is_within_same_fy, month_start, months_since_fy_start, parse_date,
};
pub use pay_cycles::{PayCycleCount, annual_base_salary, count_pay_cycles, round_pay_cycles};
pub use priority::{PriorityResolution, TierCandidates, resolve_priority};
pub use rolling_aggregation::{
    FiscalPeriod, MonthContribution, RollingAggregation, RollingWindowInput,
    aggregate_rolling_window, prior_fy_monthly_amount,
};
