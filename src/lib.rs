//! Income Eligibility Engine for irregular Australian income
//!
//! This crate determines the allowable annual income a lender may recognize
//! for overtime, casual, contract, commission, bonus and investment income.
//! Employment-based income is annualized from payslip figures over the
//! Australian financial year and smoothed with a rolling window; bonus and
//! investment income compare the current and prior financial years.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod validation;
