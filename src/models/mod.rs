//! Core data models for the income eligibility engine.
//!
//! This module contains the request, classification and result types used
//! throughout the engine.

mod calculation_result;
mod income_request;
mod income_type;

pub use calculation_result::{Assessment, CalculationDetails, IncomeResult};
pub use income_request::{
    AnnualIncome, BonusRequest, CommissionsRequest, EmploymentIncome, IncomeFamily,
    IncomeRequest, InvestmentRequest, OvertimeRequest, VariableIncomeRequest,
};
pub use income_type::{IncomeType, SalaryFrequency, VerificationMethod};
